//! Remote-backed stores: one per REST resource, each a [`StateContainer`]
//! of a snapshot plus async operations that reconcile it with the server.

pub mod auth;
pub mod doctors;
pub mod notifications;
pub mod reports;
mod resource;
pub mod sessions;

pub use auth::{AuthSnapshot, AuthStore};
pub use doctors::{DoctorsSnapshot, DoctorsStore};
pub use notifications::{MarkAllOutcome, NotificationsSnapshot, NotificationsStore};
pub use reports::{ReportsSnapshot, ReportsStore};
pub use resource::ResourceSnapshot;
pub use sessions::{SessionsSnapshot, SessionsStore};

use crate::reactive::{StateContainer, Subscription};

/// Read and observe a store's snapshot.
pub trait Store {
    type Snapshot: Clone + Send + 'static;

    fn container(&self) -> &StateContainer<Self::Snapshot>;

    /// The snapshot current at call time.
    fn snapshot(&self) -> Self::Snapshot {
        self.container().get()
    }

    /// Called once now with the current snapshot, then after every change.
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Self::Snapshot) + Send + Sync + 'static,
    {
        self.container().subscribe(callback)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::AuthPortal;
    use crate::service::ApiClient;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::stores::AuthStore;
    use crate::token::encode_test_token;
    use crate::transport::scripted::ScriptedTransport;
    use std::sync::Arc;

    /// Token that stays valid for the life of the test suite.
    pub fn live_token(sub: &str) -> String {
        encode_test_token(serde_json::json!({"sub": sub, "exp": 4_102_444_800i64}))
    }

    pub fn expired_token(sub: &str) -> String {
        encode_test_token(serde_json::json!({"sub": sub, "exp": 1_000_000_000i64}))
    }

    pub struct Harness {
        pub transport: Arc<ScriptedTransport>,
        pub cache: Arc<MemoryStore>,
        pub api: ApiClient,
        pub auth: AuthStore,
    }

    pub fn harness(portal: AuthPortal) -> Harness {
        let transport = Arc::new(ScriptedTransport::new());
        let cache = Arc::new(MemoryStore::new());
        let api = ApiClient::new(transport.clone());
        let auth = AuthStore::new(portal, api.clone(), cache.clone());
        Harness {
            transport,
            cache,
            api,
            auth,
        }
    }

    /// Harness whose auth store is restored from a valid admin token.
    pub fn signed_in_admin() -> Harness {
        let h = harness(AuthPortal::Admin);
        h.cache.set("authToken", &live_token("admin@example.org")).unwrap();
        h.auth.initialize();
        h
    }
}
