//! In-app notifications addressed to a doctor.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub link_url: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "isRead")]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_either_read_key() {
        let a: Notification = serde_json::from_str(
            r#"{"id":1,"message":"New session request","linkUrl":"/sessions/4","createdAt":"2025-01-27T14:03:11","read":true}"#,
        )
        .unwrap();
        let b: Notification = serde_json::from_str(
            r#"{"id":2,"message":"Report ready","linkUrl":null,"createdAt":"2025-01-27T14:03:11.52","isRead":false}"#,
        )
        .unwrap();
        assert!(a.read);
        assert!(!b.read);
        assert!(b.link_url.is_none());
    }
}
