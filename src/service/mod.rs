//! ApiClient: typed request/response boundary over a [`Transport`](crate::transport::Transport).

mod api;
mod validation;
pub use api::ApiClient;
pub use validation::DraftValidator;
