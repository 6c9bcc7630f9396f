//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! One bus per event type: the canvas publishes [`CanvasEvent`]s, the
//! assistant publishes [`Notification`]s. Subscribing adds a listener;
//! dropping the returned receiver removes it.
//!
//! [`CanvasEvent`]: crate::canvas::CanvasEvent
//! [`Notification`]: crate::notification::Notification

use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use shapeassist_events::{CanvasEvent, EventBus};
///
/// let bus: EventBus<CanvasEvent> = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(CanvasEvent::Canceled);
/// ```
pub struct EventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone> EventBus<E> {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that will see it; with none the
    /// event is dropped.
    pub fn publish(&self, event: E) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("Event published with no subscribers");
                0
            }
        }
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
