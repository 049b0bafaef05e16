//! Identity projection, login payloads and the cached session blob.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
}

/// Minimal view of the signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Backend ids are numeric for therapists; kept as text so both shapes round-trip.
    #[serde(default, deserialize_with = "id_from_string_or_number", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl AuthUser {
    pub fn named(name: impl Into<String>) -> Self {
        AuthUser {
            id: None,
            name: name.into(),
            email: None,
            role: None,
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    match v {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("invalid user id: {}", other))),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct NamedUser {
    #[serde(default)]
    pub name: Option<String>,
}

/// Therapist as returned by the doctor login.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LoginTherapist {
    #[serde(default, deserialize_with = "id_from_string_or_number")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Union of both login response shapes: `{token, user?, name?}` from the
/// admin login and `{token, therapist?}` from the doctor login.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<NamedUser>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub therapist: Option<LoginTherapist>,
}

/// Blob persisted by the doctor client: `{ token, user, timestamp }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedSession {
    pub token: String,
    pub user: AuthUser,
    /// Epoch milliseconds when the session was stored.
    pub timestamp: i64,
}
