//! Infrastructure layer: configuration, the shared session store, and
//! the reqwest-backed REST client implementing the core API traits.

pub mod config;
pub mod dto;
pub mod paths;
pub mod rest_client;
pub mod session_store;

pub use config::ClientConfig;
pub use paths::KitchensinkPaths;
pub use rest_client::RestClient;
pub use session_store::SessionStore;
