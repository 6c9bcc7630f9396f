//! Interaction session snapshots.
//!
//! A [`SessionSnapshot`] is never edited in place: every transition builds
//! a new value which the assistant swaps in as a whole.

use shapeassist_core::types::ClientId;
use uuid::Uuid;

use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No session.
    #[default]
    Idle,
    /// Interaction mode engaged, no object produced yet.
    Awaiting,
    /// A session object exists and history is frozen.
    Refining,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub selection: Selection,
    /// Correlates log lines of one session.
    pub id: Option<Uuid>,
    pub phase: SessionPhase,
    /// Object being refined, once the first refinement created it.
    pub object_id: Option<ClientId>,
    /// A refinement is in flight.
    pub busy: bool,
    /// Interaction events handled in this session, failed ones included.
    pub refinements: u32,
    /// Host interaction epoch when the session started. The session ends
    /// once the host reports a different one.
    pub host_epoch: u64,
    /// `freeze(true)` was applied for the session object.
    pub history_frozen: bool,
}

impl SessionSnapshot {
    pub fn idle(selection: Selection) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != SessionPhase::Idle
    }

    pub fn with_selection(&self, selection: Selection) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    /// Idle -> Awaiting, while the host is at `host_epoch`.
    pub fn started(&self, host_epoch: u64) -> Self {
        Self {
            selection: self.selection.clone(),
            id: Some(Uuid::new_v4()),
            phase: SessionPhase::Awaiting,
            host_epoch,
            ..Default::default()
        }
    }

    /// Whether interaction mode was turned off since the session started.
    pub fn is_ended_by(&self, host_epoch: u64) -> bool {
        self.is_active() && self.host_epoch != host_epoch
    }

    /// Session object whose creation was not finalized.
    pub fn unfinalized_object(&self) -> Option<ClientId> {
        self.object_id.filter(|_| !self.history_frozen)
    }

    pub fn fetching(&self) -> Self {
        Self {
            busy: true,
            ..self.clone()
        }
    }

    /// A refinement produced or updated `object_id`; history is frozen.
    pub fn refined(&self, object_id: ClientId) -> Self {
        Self {
            history_frozen: true,
            ..self.incomplete(object_id)
        }
    }

    /// `object_id` was created but the refresh or freeze that follows
    /// failed.
    pub fn incomplete(&self, object_id: ClientId) -> Self {
        Self {
            phase: SessionPhase::Refining,
            object_id: Some(object_id),
            busy: false,
            refinements: self.refinements + 1,
            ..self.clone()
        }
    }

    /// A retried finalization froze history.
    pub fn finalized(&self) -> Self {
        Self {
            history_frozen: true,
            ..self.clone()
        }
    }

    /// A refinement failed; the phase is unchanged.
    pub fn failed(&self) -> Self {
        Self {
            busy: false,
            refinements: self.refinements + 1,
            ..self.clone()
        }
    }

    /// Back to Idle, keeping only the selection.
    pub fn ended(&self) -> Self {
        Self::idle(self.selection.clone())
    }
}
