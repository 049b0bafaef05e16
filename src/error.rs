//! Typed errors for the network edge, local storage and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid origin '{0}': expected an http:// or https:// URL")]
    InvalidOrigin(String),
    #[error("invalid portal '{0}' (expected admin or doctor)")]
    InvalidPortal(String),
    #[error("config load: {0}")]
    Load(String),
}

/// Failures of the durable key-value backends behind the credential cache.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Every failure a store operation can observe.
///
/// Fetch operations fold these into the snapshot's `error` field; mutations
/// also hand them back to the caller. `Clone` so the same failure can be
/// recorded in state and returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network unreachable, connection reset, body read failed.
    #[error("transport: {0}")]
    Transport(String),
    /// Non-2xx response. `message` is the body's `message`/`detail` field, if any.
    #[error("status {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status { status: u16, message: Option<String> },
    /// Body did not match the expected shape.
    #[error("decode: {0}")]
    Decode(String),
    /// Missing or expired credential, detected before any call.
    #[error("{0}")]
    Auth(String),
    /// Payload rejected locally before sending.
    #[error("validation: {0}")]
    Validation(String),
    #[error("storage: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn not_authenticated() -> Self {
        ApiError::Auth("Not authenticated".into())
    }

    /// Text for the store's `error` field: the server's own message when it sent
    /// one, local auth/validation text as is, otherwise the operation's fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(m), .. } => m.clone(),
            ApiError::Auth(m) => m.clone(),
            ApiError::Validation(m) => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Storage(e.to_string())
    }
}
