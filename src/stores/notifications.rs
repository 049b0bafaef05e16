//! Doctor notifications with optimistic mark-as-read.

use crate::config::endpoints;
use crate::error::ApiError;
use crate::models::Notification;
use crate::reactive::{optimistic, RequestSequence, StateContainer};
use crate::service::ApiClient;
use crate::stores::resource::{RemoteResource, ResourceSnapshot};
use crate::stores::{AuthStore, Store};
use crate::transport::ApiRequest;
use futures::future::join_all;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationsSnapshot {
    pub notifications: Vec<Notification>,
    pub loading: bool,
    pub error: Option<String>,
}

impl NotificationsSnapshot {
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    fn with_read(&self, id: i64, read: bool) -> Self {
        let mut next = self.clone();
        for n in next.notifications.iter_mut().filter(|n| n.id == id) {
            n.read = read;
        }
        next
    }
}

impl ResourceSnapshot for NotificationsSnapshot {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// Result of [`NotificationsStore::mark_all_as_read`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkAllOutcome {
    pub attempted: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct NotificationsStore {
    resource: RemoteResource<NotificationsSnapshot>,
    inbox: Arc<RequestSequence>,
}

impl Store for NotificationsStore {
    type Snapshot = NotificationsSnapshot;

    fn container(&self) -> &StateContainer<NotificationsSnapshot> {
        self.resource.state()
    }
}

impl NotificationsStore {
    pub fn new(api: ApiClient, auth: AuthStore) -> Self {
        Self {
            resource: RemoteResource::new(NotificationsSnapshot::default(), api, auth),
            inbox: Arc::default(),
        }
    }

    /// Load the signed-in doctor's notifications.
    pub async fn fetch_notifications(&self) -> Vec<Notification> {
        let r = &self.resource;
        let call = async {
            let user_id = r.auth().user_id().ok_or_else(ApiError::not_authenticated)?;
            r.load::<Vec<Notification>>(ApiRequest::get(endpoints::notifications(&user_id)))
                .await
        };
        r.fetch(&self.inbox, "Failed to fetch notifications", call, |s, list| {
            s.notifications = list.clone();
        })
        .await
        .unwrap_or_default()
    }

    /// Mark one notification read locally, then on the server. A failed call
    /// restores the notification's previous `read` value and nothing else.
    pub async fn mark_as_read(&self, id: i64) -> Result<(), ApiError> {
        let r = &self.resource;
        let auth = r.auth();
        let user_id = auth.user_id().ok_or_else(ApiError::not_authenticated)?;
        auth.bearer()?;
        let prior = r
            .state()
            .with(|s| s.notifications.iter().find(|n| n.id == id).map(|n| n.read));
        let request = ApiRequest::put(endpoints::mark_notification_read(id, &user_id));
        let result = optimistic(
            r.state(),
            |s: &NotificationsSnapshot| s.with_read(id, true),
            |s: &NotificationsSnapshot| match prior {
                Some(read) => s.with_read(id, read),
                None => s.clone(),
            },
            r.send(request),
        )
        .await;
        if let Err(err) = &result {
            tracing::warn!(notification = id, error = %err, "mark as read failed, reverted");
        }
        result
    }

    /// Mark every currently unread notification, concurrently. Waits for all
    /// of them; one failure does not stop the others.
    pub async fn mark_all_as_read(&self) -> MarkAllOutcome {
        let unread: Vec<i64> = self.resource.state().with(|s| {
            s.notifications
                .iter()
                .filter(|n| !n.read)
                .map(|n| n.id)
                .collect()
        });
        if unread.is_empty() {
            return MarkAllOutcome::default();
        }
        let results = join_all(unread.iter().map(|id| self.mark_as_read(*id))).await;
        let outcome = MarkAllOutcome {
            attempted: results.len(),
            failed: results.iter().filter(|r| r.is_err()).count(),
        };
        tracing::debug!(attempted = outcome.attempted, failed = outcome.failed, "mark all as read");
        outcome
    }

    pub fn unread_count(&self) -> usize {
        self.resource.state().with(NotificationsSnapshot::unread_count)
    }

    pub fn clear_error(&self) {
        self.resource.clear_error();
    }
}
