//! REST client for the serverless-function (lambda) endpoints.
//!
//! Wraps function listing and interactor invocation using [`reqwest`].

use async_trait::async_trait;
use shapeassist_core::geometry::Point2;
use shapeassist_core::interactor::{interactors_only, Interactor};
use shapeassist_core::types::TaskId;

use crate::messages::RefineRequest;
use crate::service::{InferenceError, InferenceService};

/// HTTP client for one inference server.
pub struct LambdaApi {
    client: reqwest::Client,
    api_url: String,
}

impl LambdaApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:8080`.
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// List every deployed function (`GET /api/lambda/functions`).
    pub async fn list_functions(&self) -> Result<Vec<Interactor>, InferenceError> {
        let response = self
            .client
            .get(format!("{}/api/lambda/functions", self.api_url))
            .send()
            .await?;

        let functions: Vec<Interactor> = Self::parse_response(response).await?;
        tracing::debug!(count = functions.len(), "Listed inference functions");
        Ok(functions)
    }

    /// List only the functions usable as interactors.
    pub async fn list_interactors(&self) -> Result<Vec<Interactor>, InferenceError> {
        Ok(interactors_only(self.list_functions().await?))
    }

    /// Invoke a function (`POST /api/lambda/functions/{id}`).
    pub async fn call_function(
        &self,
        function_id: &str,
        request: &RefineRequest,
    ) -> Result<Vec<Point2>, InferenceError> {
        let response = self
            .client
            .post(self.function_url(function_id))
            .json(request)
            .send()
            .await?;

        let body: serde_json::Value = Self::parse_response(response).await?;
        parse_points(body)
    }

    fn function_url(&self, function_id: &str) -> String {
        format!("{}/api/lambda/functions/{}", self.api_url, function_id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or turn it into an
    /// [`InferenceError::Api`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, InferenceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, InferenceError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl InferenceService for LambdaApi {
    async fn refine(
        &self,
        task: TaskId,
        interactor: &Interactor,
        request: &RefineRequest,
    ) -> Result<Vec<Point2>, InferenceError> {
        if task != request.task {
            tracing::warn!(task, body_task = request.task, "Refine task id mismatch");
        }

        tracing::debug!(
            interactor = %interactor.id,
            frame = request.frame,
            clicks = request.points.len(),
            "Calling interactor",
        );

        let points = self.call_function(&interactor.id, request).await?;

        tracing::debug!(
            interactor = %interactor.id,
            vertices = points.len(),
            "Interactor returned polygon",
        );
        Ok(points)
    }
}

/// Decode an interactor response: a JSON array of `[x, y]` pairs.
pub fn parse_points(body: serde_json::Value) -> Result<Vec<Point2>, InferenceError> {
    serde_json::from_value(body).map_err(|e| InferenceError::InvalidResponse(e.to_string()))
}
