// Application layer - Widget use cases and long-running tasks
pub mod chart_widget;
pub mod feed_source;
pub mod orientation_observer;
pub mod poller;
pub mod viewport;

#[cfg(test)]
pub mod testing;
