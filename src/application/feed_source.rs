// Feed source trait - seam between the poller and the remote telemetry API
use crate::domain::series::FeedResponse;
use async_trait::async_trait;
use thiserror::Error;

/// Everything that can go wrong while fetching one feed. The poller logs
/// these and keeps the last published series.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("telemetry API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode feed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the most recent entries of the configured channel field.
    async fn fetch_feed(&self) -> Result<FeedResponse, FetchError>;

    /// Human-readable location of the feed, used in log lines.
    fn describe(&self) -> String;
}
