//! Session reports with paging, summary figures and filter options (admin portal).

use crate::config::endpoints;
use crate::error::ApiError;
use crate::models::{FilterOptions, Pagination, ReportPage, ReportQuery, ReportSummary, SessionReport, SessionReportDetails};
use crate::reactive::{RequestSequence, StateContainer};
use crate::service::ApiClient;
use crate::stores::resource::{RemoteResource, ResourceSnapshot};
use crate::stores::{AuthStore, Store};
use crate::transport::ApiRequest;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportsSnapshot {
    pub reports: Vec<SessionReport>,
    pub pagination: Pagination,
    pub summary: ReportSummary,
    pub filter_options: FilterOptions,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ResourceSnapshot for ReportsSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[derive(Clone)]
pub struct ReportsStore {
    resource: RemoteResource<ReportsSnapshot>,
    pages: Arc<RequestSequence>,
    filters: Arc<RequestSequence>,
}

impl Store for ReportsStore {
    type Snapshot = ReportsSnapshot;

    fn container(&self) -> &StateContainer<ReportsSnapshot> {
        self.resource.state()
    }
}

impl ReportsStore {
    pub fn new(api: ApiClient, auth: AuthStore) -> Self {
        Self {
            resource: RemoteResource::new(ReportsSnapshot::default(), api, auth),
            pages: Arc::default(),
            filters: Arc::default(),
        }
    }

    /// Load one page of reports. `query.page` is 1-based.
    pub async fn fetch_reports(&self, query: &ReportQuery) -> ReportPage {
        let r = &self.resource;
        let request = ApiRequest::get(endpoints::REPORTS).query(query.to_params());
        let call = async {
            let mut page: ReportPage = r.load(request).await?;
            if page.pagination.current_page == 0 {
                page.pagination.current_page = 1;
            }
            Ok::<_, ApiError>(page)
        };
        r.fetch(&self.pages, "Failed to fetch reports", call, |s, page| {
            s.reports = page.reports.clone();
            s.pagination = page.pagination.clone();
            s.summary = page.summary.clone();
        })
        .await
        .unwrap_or_default()
    }

    pub async fn fetch_filter_options(&self) -> FilterOptions {
        let r = &self.resource;
        r.fetch(
            &self.filters,
            "Failed to fetch filter options",
            r.load::<FilterOptions>(ApiRequest::get(endpoints::REPORT_FILTERS)),
            |s, options| s.filter_options = options.clone(),
        )
        .await
        .unwrap_or_default()
    }

    /// Full report for one session. The list is left untouched.
    pub async fn fetch_report_details(&self, session_id: i64) -> Option<SessionReportDetails> {
        let r = &self.resource;
        r.lookup(
            "Failed to fetch report details",
            r.load::<SessionReportDetails>(ApiRequest::get(endpoints::report(session_id))),
        )
        .await
        .ok()
    }

    pub fn clear_error(&self) {
        self.resource.clear_error();
    }
}
