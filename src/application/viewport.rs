// Viewport service trait - dimension queries and change notifications
use crate::domain::orientation::Dimensions;
use tokio::sync::mpsc;

pub trait ViewportService: Send + Sync {
    fn dimensions(&self) -> Dimensions;

    /// Register `listener` for viewport changes. The registration lasts
    /// until the returned `Subscription` is dropped.
    fn subscribe(&self, listener: mpsc::UnboundedSender<Dimensions>) -> Subscription;
}

/// Handle to a viewport registration; unregisters on drop.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    pub fn remove(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}
