// Presentation layer - Demo host endpoints
pub mod app_state;
pub mod handlers;
