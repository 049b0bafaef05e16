//! Telehealth stores: observable client-side state for the admin portal and
//! the doctor client, kept in sync with the REST backend.

pub mod config;
pub mod error;
pub mod models;
pub mod reactive;
pub mod response;
pub mod service;
pub mod state;
pub mod storage;
pub mod stores;
pub mod token;
pub mod transport;

pub use config::{from_env, AuthPortal, ClientConfig};
pub use error::{ApiError, ConfigError, StorageError};
pub use reactive::{optimistic, StateContainer, Subscription};
pub use response::Page;
pub use service::ApiClient;
pub use state::AppStores;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use stores::{
    AuthSnapshot, AuthStore, DoctorsSnapshot, DoctorsStore, MarkAllOutcome, NotificationsSnapshot, NotificationsStore,
    ReportsSnapshot, ReportsStore, SessionsSnapshot, SessionsStore, Store,
};
pub use transport::{HttpTransport, Transport};
