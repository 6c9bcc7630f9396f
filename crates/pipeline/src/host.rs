//! The host application as seen by the assistant.
//!
//! The host owns the interactor and label lists, the loaded annotation
//! objects, the active frame and the interaction-mode flag. The assistant
//! reads [`HostState`] snapshots and talks back through [`HostActions`].

use async_trait::async_trait;
use shapeassist_core::annotation::ObjectState;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::label::Label;
use shapeassist_core::types::{FrameNumber, TaskId};

use crate::error::CollectionError;

/// Read-only view of the host state relevant to the assistant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostState {
    pub task: TaskId,
    pub frame: FrameNumber,
    pub interactors: Vec<Interactor>,
    pub labels: Vec<Label>,
    /// Annotation objects currently loaded for display.
    pub objects: Vec<ObjectState>,
    /// Whether the canvas is in interaction mode.
    pub interaction_active: bool,
    /// Bumped every time interaction mode turns off, so an off that was
    /// followed by an on before anyone looked is still observable.
    pub interaction_epoch: u64,
}

/// Outbound actions the assistant dispatches to the host.
#[async_trait]
pub trait HostActions: Send + Sync {
    /// Engage interaction mode for `interactor` drawing `label` shapes.
    fn start_interaction(&self, interactor: &Interactor, label: &Label);

    /// Commit modified objects back to the collection.
    async fn update_annotations(&self, objects: Vec<ObjectState>) -> Result<(), CollectionError>;

    /// Reload the objects displayed on the current frame.
    async fn fetch_annotations(&self) -> Result<(), CollectionError>;
}
