//! Interactive shape assistant.
//!
//! Turns canvas interaction events into polygon annotations refined by a
//! remote interactor model:
//!
//! - [`selection`]: which interactor and label are active.
//! - [`session`]: immutable session snapshots and their transitions.
//! - [`refine`]: the per-event refinement pipeline.
//! - [`assistant`]: [`ShapeAssistant`], the component tying it together.
//! - [`bridge`]: [`EventBridge`], the loop feeding canvas events and host
//!   state changes into the assistant.
//! - [`memory`]: an in-memory host and annotation collection.
//!
//! External collaborators are injected as trait objects, see [`host`],
//! [`collection`] and [`canvas`].

pub mod assistant;
pub mod bridge;
pub mod canvas;
pub mod collection;
pub mod error;
pub mod host;
pub mod memory;
pub mod refine;
pub mod selection;
pub mod session;

pub use assistant::{Collaborators, ShapeAssistant};
pub use bridge::EventBridge;
pub use error::{CollectionError, RefineError};
pub use host::{HostActions, HostState};
pub use memory::MemoryWorkspace;
pub use refine::{RefineOutcome, RefinementPipeline};
pub use session::{SessionPhase, SessionSnapshot};
