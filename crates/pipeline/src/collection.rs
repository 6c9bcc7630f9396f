use async_trait::async_trait;
use shapeassist_core::annotation::ObjectState;
use shapeassist_core::types::ClientId;

use crate::error::CollectionError;

/// The host's annotation collection.
#[async_trait]
pub trait AnnotationCollection: Send + Sync {
    /// Persist new objects, returning their assigned client ids in order.
    async fn put(&self, objects: Vec<ObjectState>) -> Result<Vec<ClientId>, CollectionError>;

    /// Suspend (`true`) or resume (`false`) undo/redo history recording.
    async fn freeze(&self, frozen: bool) -> Result<(), CollectionError>;
}
