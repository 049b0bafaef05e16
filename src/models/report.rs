//! Session reports: list rows, detail view, paging envelope and filter options.

use crate::response::DEFAULT_PAGE_SIZE;
use crate::transport::QueryParams;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub session_id: i64,
    pub patient_handle: String,
    pub therapist_name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub illness: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub therapist_message: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    pub risk_assessment: RiskLevel,
}

/// Full report shown in the detail view; `clinical_notes` are the therapist's private notes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReportDetails {
    pub session_id: i64,
    pub patient_handle: String,
    pub therapist_name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub duration_in_minutes: Option<u32>,
    pub communication_type: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub illness: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    pub risk_assessment: RiskLevel,
    #[serde(default)]
    pub therapist_message: Option<String>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
}

/// Paging metadata of the report list. `current_page` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            items_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_reports: u64,
    pub unique_patients: u64,
    pub active_therapists: u64,
    pub average_duration: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub reports: Vec<SessionReport>,
    pub pagination: Pagination,
    #[serde(default)]
    pub summary: ReportSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub illnesses: Vec<String>,
    #[serde(default)]
    pub risk_assessments: Vec<String>,
}

/// Options for the report list. `page` is 1-based, as shown to users.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub search_term: Option<String>,
    /// `YYYY-MM`.
    pub month: Option<String>,
    pub city: Option<String>,
    pub illness: Option<String>,
    pub risk: Option<String>,
    pub age: Option<u32>,
}

impl ReportQuery {
    /// The backend pages from 0.
    pub fn to_params(&self) -> QueryParams {
        let page = self.page.unwrap_or(1).max(1) - 1;
        let mut q = QueryParams::new();
        q.push("page", page)
            .push("size", self.size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE))
            .push_opt("sort", self.sort.as_deref())
            .push_opt("q", self.search_term.as_deref())
            .push_opt("month", self.month.as_deref())
            .push_opt("city", self.city.as_deref())
            .push_opt("illness", self.illness.as_deref())
            .push_opt("risk", self.risk.as_deref());
        if let Some(age) = self.age.filter(|a| *a > 0) {
            q.push("age", age);
        }
        q
    }
}
