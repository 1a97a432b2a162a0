// ThingSpeak feed client - fetches the latest channel field entries over HTTP
use crate::application::feed_source::{FeedSource, FetchError};
use crate::domain::series::FeedResponse;
use crate::infrastructure::config::TelemetrySettings;
use anyhow::Context;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ThingSpeakClient {
    client: reqwest::Client,
    base_url: String,
    channel_id: String,
    field_id: String,
    results: u32,
}

impl ThingSpeakClient {
    pub fn new(settings: &TelemetrySettings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            channel_id: settings.channel_id.clone(),
            field_id: settings.field_id.clone(),
            results: settings.results,
        })
    }

    fn build_feed_url(&self) -> String {
        format!(
            "{}/channels/{}/fields/{}.json?results={}",
            self.base_url,
            urlencoding::encode(&self.channel_id),
            urlencoding::encode(&self.field_id),
            self.results
        )
    }
}

#[async_trait]
impl FeedSource for ThingSpeakClient {
    async fn fetch_feed(&self) -> Result<FeedResponse, FetchError> {
        let url = self.build_feed_url();
        tracing::debug!("Fetching feed: {}", url);

        let request_error = |source: reqwest::Error| FetchError::Request {
            url: url.clone(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await.map_err(request_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        format!("channel {} field {}", self.channel_id, self.field_id)
    }
}
