//! Load client config from environment variables.

use crate::config::types::{ClientConfig, DEFAULT_ORIGIN, DEFAULT_TIMEOUT};
use crate::config::normalize_origin;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const ORIGIN_VAR: &str = "TELEHEALTH_API_ORIGIN";
pub const PORTAL_VAR: &str = "TELEHEALTH_PORTAL";
pub const STORAGE_PATH_VAR: &str = "TELEHEALTH_STORAGE_PATH";
pub const TIMEOUT_VAR: &str = "TELEHEALTH_HTTP_TIMEOUT_SECS";

/// Build config from the process environment. Unset variables fall back to
/// the defaults (`http://localhost:8090`, admin portal, in-memory cache, 30s).
pub fn from_env() -> Result<ClientConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Same as [`from_env`] with an injectable lookup.
pub fn from_lookup<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let origin = normalize_origin(&non_empty(ORIGIN_VAR).unwrap_or_else(|| DEFAULT_ORIGIN.into()))?;
    let portal = match non_empty(PORTAL_VAR) {
        Some(p) => p.parse()?,
        None => Default::default(),
    };
    let storage_path = non_empty(STORAGE_PATH_VAR).map(PathBuf::from);
    let timeout = match non_empty(TIMEOUT_VAR) {
        Some(s) => {
            let secs: u64 = s
                .parse()
                .map_err(|_| ConfigError::Load(format!("{}: not a number of seconds: {}", TIMEOUT_VAR, s)))?;
            Duration::from_secs(secs)
        }
        None => DEFAULT_TIMEOUT,
    };

    Ok(ClientConfig {
        origin,
        portal,
        storage_path,
        timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthPortal;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.origin, "http://localhost:8090");
        assert_eq!(cfg.portal, AuthPortal::Admin);
        assert!(cfg.storage_path.is_none());
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_every_variable() {
        let cfg = from_lookup(lookup(&[
            (ORIGIN_VAR, "https://api.example.org/"),
            (PORTAL_VAR, "Doctor"),
            (STORAGE_PATH_VAR, "/tmp/creds.json"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.origin, "https://api.example.org");
        assert_eq!(cfg.portal, AuthPortal::Doctor);
        assert_eq!(cfg.storage_path, Some(PathBuf::from("/tmp/creds.json")));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_lookup(lookup(&[(PORTAL_VAR, "patient")])),
            Err(ConfigError::InvalidPortal(_))
        ));
        assert!(matches!(
            from_lookup(lookup(&[(ORIGIN_VAR, "localhost:8090")])),
            Err(ConfigError::InvalidOrigin(_))
        ));
        assert!(matches!(from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])), Err(ConfigError::Load(_))));
    }
}
