//! Session management records and list query.

use crate::response::DEFAULT_PAGE_SIZE;
use crate::transport::QueryParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: i64,
    pub communication_type: String,
    /// Display-formatted by the server (e.g. `Jan 27, 02:00 PM`).
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub status: String,
    pub patient_handle: String,
    pub therapist_name: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub duration_in_minutes: Option<i64>,
}

/// Options for the admin session list. `page` is 0-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub search_term: Option<String>,
    /// `all` or blank means no filter; sent upper-cased.
    pub status: Option<String>,
    /// Communication type; `all` or blank means no filter; sent upper-cased.
    pub kind: Option<String>,
}

impl SessionQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.push("page", self.page.unwrap_or(0))
            .push("size", self.size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE))
            .push_opt("sort", self.sort.as_deref())
            .push_opt("q", self.search_term.as_deref())
            .push_filter("status", self.status.as_deref())
            .push_filter("type", self.kind.as_deref());
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let q = SessionQuery::default().to_params();
        assert_eq!(q.get("page"), Some("0"));
        assert_eq!(q.get("size"), Some("10"));
        assert_eq!(q.pairs().len(), 2);
    }

    #[test]
    fn filters_are_upper_cased_and_all_is_dropped() {
        let q = SessionQuery {
            page: Some(2),
            sort: Some("startTime,desc".into()),
            search_term: Some("patient-17".into()),
            status: Some("completed".into()),
            kind: Some("all".into()),
            ..Default::default()
        }
        .to_params();
        assert_eq!(q.get("page"), Some("2"));
        assert_eq!(q.get("sort"), Some("startTime,desc"));
        assert_eq!(q.get("q"), Some("patient-17"));
        assert_eq!(q.get("status"), Some("COMPLETED"));
        assert_eq!(q.get("type"), None);
    }

    #[test]
    fn decodes_nullable_fields() {
        let s: SessionRecord = serde_json::from_str(
            r#"{"sessionId":9,"communicationType":"VIDEO","startTime":"Jan 27, 02:00 PM","endTime":null,
                "status":"ACTIVE","patientHandle":"p-9","therapistName":"Dr. Fernando","rating":null,"durationInMinutes":null}"#,
        )
        .unwrap();
        assert_eq!(s.session_id, 9);
        assert!(s.end_time.is_none() && s.rating.is_none());
    }
}
