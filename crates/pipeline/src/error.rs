use shapeassist_core::error::CoreError;
use shapeassist_core::types::ClientId;
use shapeassist_inference::InferenceError;

/// Errors raised by the host's annotation collection.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Annotation collection rejected the request: {0}")]
    Rejected(String),
}

/// Why a single refinement failed.
///
/// Every variant is reported to the user as a notification; none is fatal.
#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    /// The canvas emitted an interaction while interaction mode was off.
    #[error("Interaction event received while interaction mode is off")]
    InteractionInactive,

    /// The event geometry could not be turned into points.
    #[error("Malformed interaction event: {0}")]
    Malformed(#[source] CoreError),

    /// Nothing is selected for the named slot.
    #[error("No {0} selected")]
    NoSelection(&'static str),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// The session object is not among the loaded annotation states.
    #[error("Annotation object {0} is not loaded")]
    ObjectNotLoaded(ClientId),

    /// The collection persisted the object but returned no identifier.
    #[error("Annotation collection returned no client id")]
    EmptyPersistResult,

    /// The object was persisted but the display refresh or the history
    /// freeze that follows failed. The session keeps the object id without
    /// a freeze to release, and the next interaction retries both steps
    /// before refining.
    #[error("Object {client_id} created but not finalized: {source}")]
    Incomplete {
        client_id: ClientId,
        source: CollectionError,
    },
}

impl RefineError {
    /// Id of an object that was created despite the failure.
    pub fn created_object(&self) -> Option<ClientId> {
        match self {
            Self::Incomplete { client_id, .. } => Some(*client_id),
            _ => None,
        }
    }
}
