//! Sends requests through a transport and turns responses into typed values.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::response::error_message;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Shared by every store. Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over `reqwest` for the configured origin.
    pub fn http(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Send and decode the body as `R`. Non-2xx becomes [`ApiError::Status`].
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.call(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::debug!(error = %e, "response body did not match");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send and ignore the body of a successful response.
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.call(request).await.map(|_| ())
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, query = ?request.query.pairs(), "request");
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }
        let message = error_message(&response.body);
        tracing::debug!(status = response.status, message = ?message, "request failed");
        Err(ApiError::Status {
            status: response.status,
            message,
        })
    }
}
