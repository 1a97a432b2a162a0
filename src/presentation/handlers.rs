// HTTP request handlers
use crate::domain::chart::ChartView;
use crate::domain::orientation::Dimensions;
use crate::presentation::app_state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current chart view, rendered from the latest series and orientation
pub async fn get_chart(State(state): State<Arc<AppState>>) -> Json<ChartView> {
    Json(state.widget.render())
}

/// Resize the viewport; the widget picks the change up asynchronously
pub async fn put_viewport(
    State(state): State<Arc<AppState>>,
    Json(dimensions): Json<Dimensions>,
) -> StatusCode {
    let valid = |v: f64| v.is_finite() && v >= 0.0;
    if !valid(dimensions.width) || !valid(dimensions.height) {
        tracing::warn!(
            "Rejecting viewport {}x{}",
            dimensions.width,
            dimensions.height
        );
        return StatusCode::UNPROCESSABLE_ENTITY;
    }

    state.viewport.resize(dimensions);
    StatusCode::ACCEPTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_widget::ChartWidget;
    use crate::application::poller::TelemetryPoller;
    use crate::application::testing::{ScriptedSource, settle};
    use crate::application::viewport::ViewportService;
    use crate::domain::chart::ChartStyle;
    use crate::domain::orientation::LayoutDirection;
    use crate::infrastructure::viewport::ManualViewport;

    fn state() -> Arc<AppState> {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let poller = TelemetryPoller::new(Arc::new(ScriptedSource::new(vec![])), "5");
        let widget = ChartWidget::new(poller, ChartStyle::default()).mount(Arc::new(viewport.clone()));
        Arc::new(AppState { widget, viewport })
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_then_get_chart() {
        let state = state();

        let Json(before) = get_chart(State(state.clone())).await;
        assert_eq!(before.container.direction, LayoutDirection::Column);

        let status = put_viewport(
            State(state.clone()),
            Json(Dimensions::new(800.0, 400.0)),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        settle().await;

        let Json(after) = get_chart(State(state)).await;
        assert_eq!(after.container.direction, LayoutDirection::Row);
        assert_eq!(after.chart.height, 300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejects_invalid_viewport() {
        let state = state();
        let status = put_viewport(
            State(state.clone()),
            Json(Dimensions::new(-1.0, 400.0)),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.viewport.dimensions(), Dimensions::new(400.0, 800.0));
    }
}
