//! Validate configured values before they reach the transport.

use crate::error::ConfigError;

/// Check scheme and host, strip trailing slashes so paths can be appended.
pub fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidOrigin(raw.to_string()))?;
    if rest.is_empty() || rest.contains('/') || rest.contains('?') {
        return Err(ConfigError::InvalidOrigin(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
