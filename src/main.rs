// Main entry point - Dependency injection and demo host setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::{
    Router,
    routing::{get, put},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_widget::ChartWidget;
use crate::application::poller::TelemetryPoller;
use crate::domain::orientation::Dimensions;
use crate::infrastructure::config::load_widget_settings;
use crate::infrastructure::thingspeak_client::ThingSpeakClient;
use crate::infrastructure::viewport::ManualViewport;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_chart, health_check, put_viewport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = load_widget_settings()?;

    // Create feed client and viewport (infrastructure layer)
    let source = Arc::new(ThingSpeakClient::new(&settings.telemetry)?);
    let viewport = ManualViewport::new(Dimensions::new(
        settings.server.initial_width,
        settings.server.initial_height,
    ));

    // Mount the widget (application layer)
    let poller = TelemetryPoller::new(source, settings.telemetry.field_id.clone())
        .with_interval(settings.telemetry.poll_interval())
        .with_time_zone(settings.labels.time_zone)
        .with_stale_policy(settings.telemetry.stale_policy);
    let widget = ChartWidget::new(poller, settings.chart.clone()).mount(Arc::new(viewport.clone()));

    let mut views = widget.views();
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            tracing::debug!(
                "Rendered {} points at {}x{} ({:?})",
                view.chart.datasets.first().map(|d| d.data.len()).unwrap_or(0),
                view.chart.width,
                view.chart.height,
                view.container.direction
            );
        }
    });

    let state = Arc::new(AppState { widget, viewport });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/chart", get(get_chart))
        .route("/viewport", put(put_viewport))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr: SocketAddr = settings.server.bind_addr.parse()?;
    tracing::info!("Starting wind-chart host on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.widget.unmount();
    tracing::info!(
        "Chart widget unmounted with {} points in {:?}",
        state.widget.series().data.len(),
        state.widget.orientation()
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
