//! Inference access for the shape assistant.
//!
//! [`InferenceService`] is the seam the refinement pipeline depends on.
//! [`LambdaApi`] implements it over the serverless-function HTTP API.

pub mod api;
pub mod messages;
pub mod service;

pub use api::LambdaApi;
pub use messages::RefineRequest;
pub use service::{InferenceError, InferenceService};
