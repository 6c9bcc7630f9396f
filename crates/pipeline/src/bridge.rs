//! Event bridge between the canvas, the host and the assistant.
//!
//! [`EventBridge`] subscribes to the canvas event bus and to host state
//! changes and feeds both into a [`ShapeAssistant`] from a single loop.
//! Each interaction is refined to completion before the next event is
//! taken, so refinements never overlap.

use std::sync::Arc;

use shapeassist_events::{CanvasEvent, EventBus};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::assistant::ShapeAssistant;

pub struct EventBridge {
    assistant: Arc<ShapeAssistant>,
}

impl EventBridge {
    pub fn new(assistant: Arc<ShapeAssistant>) -> Self {
        Self { assistant }
    }

    /// Subscribe to `canvas` and spawn the bridge loop.
    ///
    /// The subscription is taken before this returns, so events published
    /// afterwards are never missed.
    pub fn spawn(
        self,
        canvas: &EventBus<CanvasEvent>,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let receiver = canvas.subscribe();
        tokio::spawn(self.run(receiver, cancel))
    }

    /// Run the bridge loop.
    ///
    /// Exits when `cancel` fires, the canvas bus is dropped, or the host
    /// state channel closes. Host changes are applied before pending
    /// canvas events.
    pub async fn run(
        self,
        mut canvas: broadcast::Receiver<CanvasEvent>,
        cancel: CancellationToken,
    ) {
        let mut host = self.assistant.watch_host();
        tracing::info!("Event bridge started");

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::info!("Event bridge shutting down");
                    break;
                }
                changed = host.changed() => {
                    if changed.is_err() {
                        tracing::info!("Host state closed, event bridge shutting down");
                        break;
                    }
                    host.borrow_and_update();
                    self.assistant.sync_host().await;
                }
                received = canvas.recv() => match received {
                    Ok(CanvasEvent::Interacted(event)) => {
                        self.assistant.handle_interaction(&event).await;
                    }
                    Ok(CanvasEvent::Canceled) => {
                        tracing::debug!("Canvas tool cancelled");
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Event bridge lagged, interactions dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Canvas bus closed, event bridge shutting down");
                        break;
                    }
                },
            }
        }
    }
}
