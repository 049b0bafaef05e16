//! Read the claims embedded in a bearer token. The signature is not checked;
//! the claims only drive local decisions (display name, expiry).

use crate::error::ApiError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, epoch seconds.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Expired when `exp` (seconds) is before `now_ms`. No `exp` never expires.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.exp.map(|exp| exp.saturating_mul(1000) < now_ms).unwrap_or(false)
    }

    /// Display name derived from the subject: the local part of an e-mail.
    pub fn display_name(&self) -> Option<String> {
        self.sub
            .as_deref()
            .and_then(|s| s.split('@').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Decode("token has no payload segment".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ApiError::Decode(format!("token payload: {}", e)))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("token claims: {}", e)))
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}
