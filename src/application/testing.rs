// Scripted feed source for exercising the poller and widget without a network
use crate::application::feed_source::{FeedSource, FetchError};
use crate::domain::series::FeedResponse;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub enum Outcome {
    Feed(FeedResponse),
    Failure(u16),
}

pub struct Step {
    pub delay: Duration,
    pub outcome: Outcome,
}

pub fn ok(feeds: Value) -> Step {
    Step {
        delay: Duration::ZERO,
        outcome: Outcome::Feed(feed(feeds)),
    }
}

pub fn slow_ok(delay: Duration, feeds: Value) -> Step {
    Step {
        delay,
        outcome: Outcome::Feed(feed(feeds)),
    }
}

pub fn fail(status: u16) -> Step {
    Step {
        delay: Duration::ZERO,
        outcome: Outcome::Failure(status),
    }
}

pub fn feed(feeds: Value) -> FeedResponse {
    serde_json::from_value(json!({ "feeds": feeds })).expect("valid feed fixture")
}

/// Answers each fetch with the next scripted step; fails with 503 once exhausted.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedSource {
    async fn fetch_feed(&self) -> Result<FeedResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();

        let Some(step) = step else {
            return Err(FetchError::Status {
                status: 503,
                body: "script exhausted".to_string(),
            });
        };

        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        match step.outcome {
            Outcome::Feed(response) => Ok(response),
            Outcome::Failure(status) => Err(FetchError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Let spawned tasks run to their next suspension point.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
