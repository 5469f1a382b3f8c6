//! HTTP client for a running sync server.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Snapshot, SnapshotView};
use crate::server::HealthResponse;
use crate::sync::SyncSuccess;

/// Errors that can occur during sync client operations.
#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or the response could not be read
    HttpError(String),
    /// Server answered with a failure envelope
    ServerError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::HttpError(e) => write!(f, "HTTP error: {}", e),
            ClientError::ServerError(e) => write!(f, "Server reported failure: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

/// Pushes and pulls full snapshots.
#[derive(Debug, Clone)]
pub struct SyncClient {
    base_url: String,
    http: reqwest::Client,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the server is reachable.
    pub async fn check_server(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        decode(response).await
    }

    /// Replaces the server's state with `snapshot`.
    pub async fn push(&self, snapshot: &Snapshot) -> Result<SyncSuccess, ClientError> {
        let payload =
            serde_json::to_string(snapshot).map_err(|e| ClientError::HttpError(e.to_string()))?;
        self.push_raw(payload).await
    }

    /// Sends a payload verbatim; the server validates it.
    pub async fn push_raw(&self, payload: String) -> Result<SyncSuccess, ClientError> {
        let response = self
            .http
            .post(self.url("/sync"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        decode(response).await
    }

    /// Fetches the server's current state.
    pub async fn pull(&self) -> Result<SnapshotView, ClientError> {
        let response = self
            .http
            .get(self.url("/sync"))
            .send()
            .await
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        decode(response).await
    }
}

/// Reads a response body, surfacing `{success: false, error}` envelopes.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body: Value = response.json().await.map_err(|e| {
        ClientError::HttpError(format!("Server returned status {}: {}", status, e))
    })?;

    if body.get("success") == Some(&Value::Bool(false)) {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ClientError::ServerError(error));
    }
    if !status.is_success() {
        return Err(ClientError::HttpError(format!(
            "Server returned status {}",
            status
        )));
    }

    serde_json::from_value(body).map_err(|e| ClientError::HttpError(e.to_string()))
}
