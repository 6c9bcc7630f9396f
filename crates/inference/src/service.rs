//! The inference seam used by the refinement pipeline.

use async_trait::async_trait;
use shapeassist_core::geometry::Point2;
use shapeassist_core::interactor::Interactor;
use shapeassist_core::types::TaskId;

use crate::messages::RefineRequest;

/// Errors from an inference call. All of them are recoverable and
/// reported to the user.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The inference server returned a non-2xx status code.
    #[error("Inference API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server answered but the payload was not a point list.
    #[error("Invalid inference response: {0}")]
    InvalidResponse(String),

    /// The model rejected the request.
    #[error("Inference rejected: {0}")]
    Rejected(String),
}

/// Turns a sparse set of clicked points into a refined polygon outline.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Run `interactor` on the request and return the polygon vertices.
    async fn refine(
        &self,
        task: TaskId,
        interactor: &Interactor,
        request: &RefineRequest,
    ) -> Result<Vec<Point2>, InferenceError>;
}
