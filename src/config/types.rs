//! Client configuration types.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8090";

/// Transport timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which front-end the stores serve. Selects the login endpoint and the shape
/// of the cached credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthPortal {
    /// Admin portal: `/api/auth/login`, bare token cached under `authToken`.
    #[default]
    Admin,
    /// Doctor client: `/api/auth/doctor-login`, session blob cached under `manosara_auth`.
    Doctor,
}

impl AuthPortal {
    pub fn login_path(self) -> &'static str {
        match self {
            AuthPortal::Admin => crate::config::endpoints::ADMIN_LOGIN,
            AuthPortal::Doctor => crate::config::endpoints::DOCTOR_LOGIN,
        }
    }

    pub fn cache_key(self) -> &'static str {
        match self {
            AuthPortal::Admin => "authToken",
            AuthPortal::Doctor => "manosara_auth",
        }
    }
}

impl std::str::FromStr for AuthPortal {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(AuthPortal::Admin),
            "doctor" | "client" => Ok(AuthPortal::Doctor),
            _ => Err(ConfigError::InvalidPortal(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme + host (+ port), no trailing slash.
    pub origin: String,
    pub portal: AuthPortal,
    /// JSON file backing the credential cache. `None` keeps it in memory.
    pub storage_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            origin: DEFAULT_ORIGIN.into(),
            portal: AuthPortal::Admin,
            storage_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(origin: impl Into<String>, portal: AuthPortal) -> Result<Self, ConfigError> {
        let origin = crate::config::normalize_origin(&origin.into())?;
        Ok(ClientConfig {
            origin,
            portal,
            ..ClientConfig::default()
        })
    }
}
