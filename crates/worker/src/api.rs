//! REST client for the worker's JSON API.
//!
//! Every call is a single request/response round trip; the worker blocks
//! until it has an answer, so the client timeout is long. Non-2xx answers
//! become [`WorkerApiError::Rejected`] carrying the best message the body
//! offers.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::WorkerConfig;
use crate::messages::{
    DatasetAddRequest, DatasetAddResponse, GenerateImageResponse, GenerationRequest,
    PreviewResponse, TrainLoraRequest, TrainLoraResponse, UpscaleRequest, UpscaleResponse,
};

/// HTTP client for a single worker instance.
#[derive(Debug, Clone)]
pub struct WorkerApi {
    client: reqwest::Client,
    api_url: String,
    root_url: String,
}

/// Errors from the worker client layer.
#[derive(Debug, thiserror::Error)]
pub enum WorkerApiError {
    /// The HTTP request itself failed (connection refused, timeout, TLS).
    #[error("Worker request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The worker answered 2xx with a body that does not match the contract.
    #[error("Worker returned an unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The worker answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code returned by the worker.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },
}

impl WorkerApi {
    /// Create a client with the configured request timeout.
    pub fn new(config: &WorkerConfig) -> Result<Self, WorkerApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &WorkerConfig) -> Self {
        Self {
            client,
            api_url: config.api_url(),
            root_url: config.root_url(),
        }
    }

    /// `POST /api/train-lora`
    pub async fn train_lora(
        &self,
        request: &TrainLoraRequest,
    ) -> Result<TrainLoraResponse, WorkerApiError> {
        self.post_json("/train-lora", request).await
    }

    /// `POST /api/generate-image`
    pub async fn generate_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateImageResponse, WorkerApiError> {
        self.post_json("/generate-image", request).await
    }

    /// `POST /api/generate/comfy`: a small batch of low-step previews.
    pub async fn generate_previews(
        &self,
        request: &GenerationRequest,
    ) -> Result<PreviewResponse, WorkerApiError> {
        self.post_json("/generate/comfy", request).await
    }

    /// `POST /api/upscale`
    pub async fn upscale(
        &self,
        request: &UpscaleRequest,
    ) -> Result<UpscaleResponse, WorkerApiError> {
        self.post_json("/upscale", request).await
    }

    /// `POST /api/models/{model_id}/dataset/add`
    pub async fn add_dataset_image(
        &self,
        request: &DatasetAddRequest,
    ) -> Result<DatasetAddResponse, WorkerApiError> {
        let path = format!(
            "/models/{}/dataset/add",
            urlencoding::encode(&request.model_id)
        );
        self.post_json(&path, request).await
    }

    /// `GET /api/jobs/{job_id}`. The body is passed through untouched.
    pub async fn fetch_job(&self, job_id: &str) -> Result<serde_json::Value, WorkerApiError> {
        let path = format!("/jobs/{}", urlencoding::encode(job_id));
        let url = format!("{}{path}", self.api_url);
        tracing::debug!(%path, "Fetching worker job");
        let response = self.client.get(url).send().await?;
        Self::parse_response(&path, response).await
    }

    /// `GET /` on the worker root. Any 2xx answer counts as healthy.
    pub async fn health(&self) -> Result<(), WorkerApiError> {
        let response = self
            .client
            .get(format!("{}/", self.root_url))
            .send()
            .await?;
        Self::ensure_success("/", response).await?;
        Ok(())
    }

    // ---- private helpers ----

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, WorkerApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{path}", self.api_url);
        tracing::debug!(%path, "Calling worker");
        let response = self.client.post(url).json(body).send().await?;
        Self::parse_response(path, response).await
    }

    /// Return the response unchanged on success, or a
    /// [`WorkerApiError::Rejected`] with the extracted message on failure.
    async fn ensure_success(
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WorkerApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status.as_u16(), &body);
        tracing::warn!(%path, status = status.as_u16(), %message, "Worker rejected request");
        Err(WorkerApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a successful JSON body. Reading and decoding are separate so a
    /// contract mismatch surfaces as [`WorkerApiError::Decode`].
    async fn parse_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, WorkerApiError> {
        let response = Self::ensure_success(path, response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%path, error = %e, "Worker response did not decode");
            WorkerApiError::Decode(e)
        })
    }
}

/// Pick the most useful message out of a failed worker response body.
///
/// Tries `detail` (non-string values are re-serialized), then `error`, then
/// `message`, then the raw body text, then a generic status message.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        match map.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
        for key in ["error", "message"] {
            if let Some(serde_json::Value::String(s)) = map.get(key) {
                if !s.is_empty() {
                    return s.clone();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("Worker request failed with {status}")
}
