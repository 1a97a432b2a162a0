use crate::application::poller::StalePolicy;
use crate::domain::chart::ChartStyle;
use crate::domain::series::LabelTimeZone;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";
pub const DEFAULT_CHANNEL_ID: &str = "1293177";
pub const DEFAULT_FIELD_ID: &str = "5";
pub const DEFAULT_RESULTS: u32 = 15;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WidgetSettings {
    pub telemetry: TelemetrySettings,
    pub chart: ChartStyle,
    pub labels: LabelSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TelemetrySettings {
    pub base_url: String,
    pub channel_id: String,
    pub field_id: String,
    pub results: u32,
    pub poll_interval_ms: u64,
    /// No timeout unless set.
    pub request_timeout_ms: Option<u64>,
    pub stale_policy: StalePolicy,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            field_id: DEFAULT_FIELD_ID.to_string(),
            results: DEFAULT_RESULTS,
            poll_interval_ms: 15_000,
            request_timeout_ms: None,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl TelemetrySettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LabelSettings {
    pub time_zone: LabelTimeZone,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub initial_width: f64,
    pub initial_height: f64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            initial_width: 400.0,
            initial_height: 800.0,
        }
    }
}

pub fn load_widget_settings() -> anyhow::Result<WidgetSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widget").required(false))
        .build()?;

    let settings: WidgetSettings = settings.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}

impl WidgetSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        let telemetry = &self.telemetry;
        anyhow::ensure!(!telemetry.channel_id.is_empty(), "telemetry.channel_id must not be empty");
        anyhow::ensure!(!telemetry.field_id.is_empty(), "telemetry.field_id must not be empty");
        anyhow::ensure!(telemetry.results > 0, "telemetry.results must be positive");
        anyhow::ensure!(
            telemetry.poll_interval_ms > 0,
            "telemetry.poll_interval_ms must be positive"
        );
        anyhow::ensure!(
            self.server.initial_width >= 0.0 && self.server.initial_height >= 0.0,
            "server.initial_width and server.initial_height must not be negative"
        );
        Ok(())
    }
}
