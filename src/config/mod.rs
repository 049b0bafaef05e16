pub mod types;
pub mod loader;
pub mod validator;
pub mod endpoints;

pub use types::*;
pub use loader::*;
pub use validator::*;
