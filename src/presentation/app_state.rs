// Application state for HTTP handlers
use crate::application::chart_widget::MountedWidget;
use crate::infrastructure::viewport::ManualViewport;

pub struct AppState {
    pub widget: MountedWidget,
    pub viewport: ManualViewport,
}
