//! Shape assistant event plumbing.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, shared via `Arc`.
//! - [`CanvasEvent`]: what the canvas emits while the user interacts.
//! - [`InteractOptions`]: the command the canvas honours to start or stop
//!   point collection.
//! - [`Notification`]: user-visible messages raised by the assistant.

pub mod bus;
pub mod canvas;
pub mod notification;

pub use bus::EventBus;
pub use canvas::{CanvasEvent, InteractOptions, InteractionEvent};
pub use notification::{Notification, NotificationLevel};
