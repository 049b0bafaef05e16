//! Paged session list (admin portal).

use crate::config::endpoints;
use crate::error::ApiError;
use crate::models::{SessionQuery, SessionRecord};
use crate::reactive::{RequestSequence, StateContainer};
use crate::response::Page;
use crate::service::ApiClient;
use crate::stores::resource::{RemoteResource, ResourceSnapshot};
use crate::stores::{AuthStore, Store};
use crate::transport::ApiRequest;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionsSnapshot {
    pub page: Page<SessionRecord>,
    /// Options of the last successful fetch.
    pub query: SessionQuery,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ResourceSnapshot for SessionsSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[derive(Clone)]
pub struct SessionsStore {
    resource: RemoteResource<SessionsSnapshot>,
    pages: Arc<RequestSequence>,
}

impl Store for SessionsStore {
    type Snapshot = SessionsSnapshot;

    fn container(&self) -> &StateContainer<SessionsSnapshot> {
        self.resource.state()
    }
}

impl SessionsStore {
    pub fn new(api: ApiClient, auth: AuthStore) -> Self {
        Self {
            resource: RemoteResource::new(SessionsSnapshot::default(), api, auth),
            pages: Arc::default(),
        }
    }

    /// Load one page. On failure the previous page stays and an empty page is returned.
    pub async fn fetch_sessions(&self, query: SessionQuery) -> Page<SessionRecord> {
        let r = &self.resource;
        let request = ApiRequest::get(endpoints::SESSIONS).query(query.to_params());
        r.fetch(&self.pages, "Failed to fetch sessions", r.load::<Page<SessionRecord>>(request), |s, page| {
            s.page = page.clone();
            s.query = query.clone();
        })
        .await
        .unwrap_or_default()
    }

    /// Delete a session and drop it from the current page.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let r = &self.resource;
        r.mutate(
            "Failed to delete session",
            r.send(ApiRequest::delete(endpoints::session(id))),
            |s, _| {
                let before = s.page.content.len();
                s.page.content.retain(|rec| rec.session_id != id);
                let removed = (before - s.page.content.len()) as u64;
                s.page.total_elements = s.page.total_elements.saturating_sub(removed);
            },
        )
        .await
    }

    pub fn clear_error(&self) {
        self.resource.clear_error();
    }
}
