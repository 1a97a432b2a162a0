// Telemetry poller - fetch on start, then once per interval until stopped
use crate::application::feed_source::FeedSource;
use crate::domain::series::{LabelTimeZone, SampleSeries};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(15_000);

/// Which response wins when fetches overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Whatever resolves last is published, even if it was issued earlier.
    #[default]
    LastResolved,
    /// A response is dropped once a later-issued fetch has been published.
    LastIssued,
}

pub struct TelemetryPoller {
    source: Arc<dyn FeedSource>,
    field_id: String,
    interval: Duration,
    time_zone: LabelTimeZone,
    stale_policy: StalePolicy,
}

impl TelemetryPoller {
    pub fn new(source: Arc<dyn FeedSource>, field_id: impl Into<String>) -> Self {
        Self {
            source,
            field_id: field_id.into(),
            interval: DEFAULT_POLL_INTERVAL,
            time_zone: LabelTimeZone::default(),
            stale_policy: StalePolicy::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_time_zone(mut self, time_zone: LabelTimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_stale_policy(mut self, stale_policy: StalePolicy) -> Self {
        self.stale_policy = stale_policy;
        self
    }

    /// Spawn the ticker. The first fetch is issued immediately.
    pub fn start(self) -> PollerHandle {
        let (tx, rx) = watch::channel(SampleSeries::default());
        let shared = Arc::new(PollShared {
            source: self.source,
            field_id: self.field_id,
            time_zone: self.time_zone,
            stale_policy: self.stale_policy,
            tx,
            last_published: Mutex::new(0),
            stopped: AtomicBool::new(false),
        });

        tracing::info!(
            "Polling {} every {}ms",
            shared.source.describe(),
            self.interval.as_millis()
        );

        let interval = self.interval;
        let ticker_shared = shared.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Dropped with this task on stop, which aborts every fetch still in flight
            let mut in_flight = JoinSet::new();
            let mut issued: u64 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        issued += 1;
                        in_flight.spawn(poll_once(ticker_shared.clone(), issued));
                    }
                    Some(joined) = in_flight.join_next() => {
                        if let Err(e) = joined {
                            if e.is_panic() {
                                tracing::error!("Fetch task panicked: {}", e);
                            }
                        }
                    }
                }
            }
        });

        PollerHandle {
            shared,
            task,
            series: rx,
        }
    }
}

struct PollShared {
    source: Arc<dyn FeedSource>,
    field_id: String,
    time_zone: LabelTimeZone,
    stale_policy: StalePolicy,
    tx: watch::Sender<SampleSeries>,
    last_published: Mutex<u64>,
    stopped: AtomicBool,
}

impl PollShared {
    fn publish(&self, generation: u64, series: SampleSeries) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        let mut last = self
            .last_published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.stale_policy == StalePolicy::LastIssued && generation < *last {
            tracing::debug!(
                "Discarding response #{}; #{} already published",
                generation,
                *last
            );
            return;
        }

        *last = (*last).max(generation);
        self.tx.send_replace(series);
    }
}

async fn poll_once(shared: Arc<PollShared>, generation: u64) {
    let response = match shared.source.fetch_feed().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error fetching data from {}: {}", shared.source.describe(), e);
            return;
        }
    };

    match SampleSeries::from_feed(&response, &shared.field_id, shared.time_zone) {
        Ok(series) => {
            let channel = response.channel.unwrap_or_default();

            tracing::debug!(
                "Fetch #{} from {:?} (last entry {:?}): {} entries, {} numeric",
                generation,
                channel.name,
                channel.last_entry_id,
                response.feeds.len(),
                series.data.len()
            );

            shared.publish(generation, series);
        }
        Err(e) => {
            tracing::error!("Error parsing data from {}: {}", shared.source.describe(), e);
        }
    }
}

/// Running poller. Stopping (or dropping) cancels the ticker and any
/// fetch still in flight; nothing is published afterwards.
pub struct PollerHandle {
    shared: Arc<PollShared>,
    task: JoinHandle<()>,
    series: watch::Receiver<SampleSeries>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<SampleSeries> {
        self.series.clone()
    }

    pub fn latest(&self) -> SampleSeries {
        self.series.borrow().clone()
    }

    pub fn stop(&self) {
        if !self.shared.stopped.swap(true, Ordering::SeqCst) {
            tracing::info!("Stopped polling {}", self.shared.source.describe());
        }
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
