//! The interactive shape assistant component.
//!
//! [`ShapeAssistant`] owns the selection and the session snapshot, and
//! drives the session lifecycle:
//!
//! ```text
//! Idle --start_interaction--> Awaiting --interaction--> Refining
//!   ^                            |                          |
//!   +---- host interaction mode turns off ------------------+
//! ```
//!
//! Refinements and session ends are serialized behind one async mutex, so
//! a second interaction never races the first one's "is there an object
//! yet" check, and turning interaction mode off takes effect only after an
//! in-flight refinement has finished. Session ends are detected through
//! the host's interaction epoch rather than the on/off flag, which a
//! `watch` receiver may see only in its latest state.

use std::sync::Arc;

use shapeassist_core::error::CoreError;
use shapeassist_core::types::LabelId;
use shapeassist_events::{EventBus, InteractOptions, InteractionEvent, Notification};
use shapeassist_inference::InferenceService;
use tokio::sync::{watch, Mutex};

use crate::canvas::Canvas;
use crate::collection::AnnotationCollection;
use crate::error::RefineError;
use crate::host::{HostActions, HostState};
use crate::refine::{RefineOutcome, RefinementPipeline};
use crate::selection::Selection;
use crate::session::SessionSnapshot;

/// Title of notifications raised for failed refinements.
pub const INTERACTION_ERROR_TITLE: &str = "Interaction error";

/// Handles to the external collaborators, injected at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub inference: Arc<dyn InferenceService>,
    pub collection: Arc<dyn AnnotationCollection>,
    pub host: Arc<dyn HostActions>,
    pub canvas: Arc<dyn Canvas>,
}

pub struct ShapeAssistant {
    host_state: watch::Receiver<HostState>,
    session: watch::Sender<SessionSnapshot>,
    collection: Arc<dyn AnnotationCollection>,
    host: Arc<dyn HostActions>,
    canvas: Arc<dyn Canvas>,
    pipeline: RefinementPipeline,
    notifications: Arc<EventBus<Notification>>,
    serial: Mutex<()>,
}

impl ShapeAssistant {
    /// Create an idle assistant.
    ///
    /// The first available interactor and label are preselected.
    pub fn new(
        collaborators: Collaborators,
        host_state: watch::Receiver<HostState>,
        notifications: Arc<EventBus<Notification>>,
    ) -> Self {
        let selection = {
            let host = host_state.borrow();
            Selection::first_of(&host.interactors, &host.labels)
        };
        let (session, _) = watch::channel(SessionSnapshot::idle(selection));

        let Collaborators {
            inference,
            collection,
            host,
            canvas,
        } = collaborators;

        let pipeline =
            RefinementPipeline::new(inference, Arc::clone(&collection), Arc::clone(&host));

        Self {
            host_state,
            session,
            pipeline,
            collection,
            host,
            canvas,
            notifications,
            serial: Mutex::new(()),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> SessionSnapshot {
        self.session.borrow().clone()
    }

    /// Observe every session transition (e.g. to show the busy indicator).
    pub fn subscribe_session(&self) -> watch::Receiver<SessionSnapshot> {
        self.session.subscribe()
    }

    /// A fresh receiver on the host state this assistant reads.
    pub fn watch_host(&self) -> watch::Receiver<HostState> {
        self.host_state.clone()
    }

    // ---- selection ----

    /// Select the interactor with `id` among the host's interactors.
    pub fn select_interactor(&self, id: &str) -> Result<(), CoreError> {
        let available = self.host_state.borrow().interactors.clone();
        let mut result = Ok(());
        self.transition(|current| {
            let mut selection = current.selection.clone();
            result = selection.select_interactor(&available, id);
            current.with_selection(selection)
        });

        match &result {
            Ok(()) => tracing::debug!(interactor = id, "Interactor selected"),
            Err(e) => tracing::warn!(interactor = id, error = %e, "Interactor selection cleared"),
        }
        result
    }

    /// Select the label with `id` among the host's labels.
    pub fn select_label(&self, id: LabelId) -> Result<(), CoreError> {
        let available = self.host_state.borrow().labels.clone();
        let mut result = Ok(());
        self.transition(|current| {
            let mut selection = current.selection.clone();
            result = selection.select_label(&available, id);
            current.with_selection(selection)
        });

        match &result {
            Ok(()) => tracing::debug!(label = id, "Label selected"),
            Err(e) => tracing::warn!(label = id, error = %e, "Label selection cleared"),
        }
        result
    }

    // ---- lifecycle ----

    /// Idle -> Awaiting: put the canvas into point-collecting mode.
    ///
    /// History is not frozen until the first object exists.
    pub fn start_interaction(&self) -> Result<(), CoreError> {
        let host_epoch = self.host_state.borrow().interaction_epoch;
        let mut picked = Err(CoreError::Conflict(
            "an interaction session is already active".to_string(),
        ));
        let session = self.transition(|current| {
            if current.is_active() {
                return current.clone();
            }
            picked = match (&current.selection.interactor, &current.selection.label) {
                (Some(interactor), Some(label)) => Ok((interactor.clone(), label.clone())),
                (None, _) => Err(CoreError::Validation(
                    "select an interactor before interacting".to_string(),
                )),
                (_, None) => Err(CoreError::Validation(
                    "select a label before interacting".to_string(),
                )),
            };
            if picked.is_ok() {
                current.started(host_epoch)
            } else {
                current.clone()
            }
        });
        let (interactor, label) = picked?;

        self.canvas.cancel();
        self.canvas
            .interact(InteractOptions::collect_points(interactor.min_vertices()));
        self.host.start_interaction(&interactor, &label);

        tracing::info!(
            session_id = ?session.id,
            interactor = %interactor.id,
            label = label.id,
            "Interaction session started",
        );
        Ok(())
    }

    /// Ask the canvas to stop collecting points.
    ///
    /// The session itself ends once the host reports interaction mode off.
    pub fn stop_interaction(&self) {
        self.canvas.interact(InteractOptions::disabled());
    }

    /// Refine the session shape from one canvas interaction.
    ///
    /// Failures are reported as notifications and yield `None`; the busy
    /// flag is cleared either way.
    pub async fn handle_interaction(&self, event: &InteractionEvent) -> Option<RefineOutcome> {
        let _serial = self.serial.lock().await;

        match self.refine_locked(event).await {
            Ok(outcome) => {
                let session = self.transition(|s| s.refined(outcome.client_id()));
                tracing::info!(
                    session_id = ?session.id,
                    ?outcome,
                    refinements = session.refinements,
                    "Refinement applied",
                );
                Some(outcome)
            }
            Err(e) => {
                let session = self.transition(|s| match e.created_object() {
                    Some(client_id) => s.incomplete(client_id),
                    None => s.failed(),
                });
                tracing::warn!(session_id = ?session.id, error = %e, "Refinement failed");
                self.notify_error(&e);
                None
            }
        }
    }

    /// Apply the latest host state.
    ///
    /// Interaction mode turning off since the session started ends it,
    /// releasing the history freeze if one was taken. The host's epoch
    /// counts every off, so an off quickly followed by an on still counts.
    pub async fn sync_host(&self) {
        let _serial = self.serial.lock().await;
        let host_epoch = self.host_state.borrow().interaction_epoch;

        let session = self.session();
        if session.is_ended_by(host_epoch) {
            self.end_session(session).await;
        }
    }

    /// Finalize a pending create if needed, then refine. Runs under the
    /// serial lock.
    async fn refine_locked(&self, event: &InteractionEvent) -> Result<RefineOutcome, RefineError> {
        let mut session = self.transition(SessionSnapshot::fetching);

        let interaction_active = self.host_state.borrow().interaction_active;
        if let Some(client_id) = session.unfinalized_object().filter(|_| interaction_active) {
            self.pipeline.finalize_created(client_id).await?;
            session = self.transition(SessionSnapshot::finalized);
            tracing::debug!(client_id, "Session object finalized on retry");
        }

        let host = self.host_state.borrow().clone();
        self.pipeline.refine(&session, &host, event).await
    }

    async fn end_session(&self, session: SessionSnapshot) {
        if let Some(client_id) = session.object_id.filter(|_| session.history_frozen) {
            if let Err(e) = self.collection.freeze(false).await {
                tracing::error!(client_id, error = %e, "Failed to release history freeze");
                self.notifications
                    .publish(Notification::error(INTERACTION_ERROR_TITLE, e.to_string()));
            }
        }

        self.transition(SessionSnapshot::ended);
        tracing::info!(
            session_id = ?session.id,
            object_id = ?session.object_id,
            released = session.history_frozen,
            refinements = session.refinements,
            "Interaction session ended",
        );
    }

    // ---- private helpers ----

    /// Replace the session snapshot with `next(current)` in one step and
    /// return the new value.
    fn transition(
        &self,
        next: impl FnOnce(&SessionSnapshot) -> SessionSnapshot,
    ) -> SessionSnapshot {
        let mut replaced = SessionSnapshot::default();
        self.session.send_modify(|current| {
            *current = next(current);
            replaced = current.clone();
        });
        replaced
    }

    fn notify_error(&self, error: &RefineError) {
        self.notifications
            .publish(Notification::error(INTERACTION_ERROR_TITLE, error.to_string()));
    }
}
