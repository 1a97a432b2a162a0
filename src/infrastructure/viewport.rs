// In-memory viewport service driven by the host (resize calls)
use crate::application::viewport::{Subscription, ViewportService};
use crate::domain::orientation::Dimensions;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct ManualViewport {
    inner: Arc<Mutex<ViewportState>>,
}

#[derive(Debug)]
struct ViewportState {
    dimensions: Dimensions,
    listeners: HashMap<u64, mpsc::UnboundedSender<Dimensions>>,
    next_id: u64,
}

impl ManualViewport {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewportState {
                dimensions,
                listeners: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Update the dimensions and notify every registered listener.
    pub fn resize(&self, dimensions: Dimensions) {
        let mut state = self.lock();
        state.dimensions = dimensions;
        state
            .listeners
            .retain(|_, listener| listener.send(dimensions).is_ok());

        tracing::debug!(
            "Viewport resized to {}x{}, notified {} listeners",
            dimensions.width,
            dimensions.height,
            state.listeners.len()
        );
    }

    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, ViewportState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewportService for ManualViewport {
    fn dimensions(&self) -> Dimensions {
        self.lock().dimensions
    }

    fn subscribe(&self, listener: mpsc::UnboundedSender<Dimensions>) -> Subscription {
        let id = {
            let mut state = self.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.insert(id, listener);
            id
        };

        let registry = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .remove(&id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_dimensions() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        viewport.resize(Dimensions::new(800.0, 400.0));
        assert_eq!(viewport.dimensions(), Dimensions::new(800.0, 400.0));
    }

    #[test]
    fn test_notifies_until_unsubscribed() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = viewport.subscribe(tx);

        viewport.resize(Dimensions::new(800.0, 400.0));
        assert_eq!(rx.try_recv().unwrap(), Dimensions::new(800.0, 400.0));

        subscription.remove();
        assert_eq!(viewport.listener_count(), 0);

        viewport.resize(Dimensions::new(400.0, 800.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_listeners_are_pruned() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let (tx, rx) = mpsc::unbounded_channel();
        let _subscription = viewport.subscribe(tx);
        drop(rx);

        viewport.resize(Dimensions::new(500.0, 800.0));
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_viewport() {
        let viewport = ManualViewport::new(Dimensions::new(400.0, 800.0));
        let (tx, _rx) = mpsc::unbounded_channel();
        let subscription = viewport.subscribe(tx);
        drop(viewport);
        subscription.remove();
    }
}
