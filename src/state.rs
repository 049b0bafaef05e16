//! Explicit application stores: built once, handed to whatever renders them.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::service::ApiClient;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::stores::{AuthStore, DoctorsStore, NotificationsStore, ReportsStore, SessionsStore};
use crate::transport::Transport;
use std::sync::Arc;

/// Every store, wired to one API client and one auth store.
#[derive(Clone)]
pub struct AppStores {
    pub auth: AuthStore,
    pub doctors: DoctorsStore,
    pub sessions: SessionsStore,
    pub reports: ReportsStore,
    pub notifications: NotificationsStore,
}

impl AppStores {
    /// `reqwest` transport to the configured origin; the credential cache is a
    /// JSON file when `storage_path` is set, memory otherwise. The cached
    /// credential is restored before returning.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let cache: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Arc::new(FileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        };
        let stores = Self::with_client(config, ApiClient::http(config)?, cache);
        stores.auth.initialize();
        Ok(stores)
    }

    /// Stores over any transport, e.g. a test double. Starts signed out.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>, cache: Arc<dyn KeyValueStore>) -> Self {
        Self::with_client(config, ApiClient::new(transport), cache)
    }

    fn with_client(config: &ClientConfig, api: ApiClient, cache: Arc<dyn KeyValueStore>) -> Self {
        let auth = AuthStore::new(config.portal, api.clone(), cache);
        AppStores {
            doctors: DoctorsStore::new(api.clone(), auth.clone()),
            sessions: SessionsStore::new(api.clone(), auth.clone()),
            reports: ReportsStore::new(api.clone(), auth.clone()),
            notifications: NotificationsStore::new(api, auth.clone()),
            auth,
        }
    }
}
