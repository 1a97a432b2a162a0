// Orientation observer - classifies the viewport and follows its changes
use crate::application::viewport::{Subscription, ViewportService};
use crate::domain::orientation::{Dimensions, Orientation};
use std::sync::{Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub struct OrientationObserver;

impl OrientationObserver {
    /// Publish the current classification and follow viewport changes.
    ///
    /// Every notification republishes, even when the classification is
    /// unchanged, so subscribers re-render on each viewport change.
    pub fn start(viewport: &dyn ViewportService) -> ObserverHandle {
        // Register before the first read so no change slips in between
        let (listener_tx, mut listener_rx) = mpsc::unbounded_channel::<Dimensions>();
        let subscription = viewport.subscribe(listener_tx);

        let initial = Orientation::from_dimensions(viewport.dimensions());
        let (tx, rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            while let Some(dimensions) = listener_rx.recv().await {
                let orientation = Orientation::from_dimensions(dimensions);
                tracing::debug!(
                    "Viewport changed to {}x{} ({:?})",
                    dimensions.width,
                    dimensions.height,
                    orientation
                );
                tx.send_replace(orientation);
            }
        });

        ObserverHandle {
            subscription: Mutex::new(Some(subscription)),
            task,
            orientation: rx,
        }
    }
}

pub struct ObserverHandle {
    subscription: Mutex<Option<Subscription>>,
    task: JoinHandle<()>,
    orientation: watch::Receiver<Orientation>,
}

impl ObserverHandle {
    pub fn current(&self) -> Orientation {
        *self.orientation.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Orientation> {
        self.orientation.clone()
    }

    /// Unregister from the viewport and stop the listener task.
    pub fn stop(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(subscription) = subscription {
            subscription.remove();
        }
        self.task.abort();
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
