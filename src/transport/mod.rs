//! Network edge. Stores build [`ApiRequest`] values; a [`Transport`] sends them.

pub mod http;
pub mod request;
#[cfg(test)]
pub(crate) mod scripted;

pub use http::HttpTransport;
pub use request::{ApiRequest, ApiResponse, FormPart, Method, MultipartForm, QueryParams, RequestBody};

use crate::error::ApiError;
use async_trait::async_trait;

/// Sends one request and returns the raw response. Only network-level
/// problems are errors here; status codes are judged by the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
