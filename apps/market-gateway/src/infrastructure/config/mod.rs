//! Configuration Module
//!
//! Environment-driven gateway settings and the JSON-file config store.

mod settings;
mod store;

pub use settings::{ConfigError, CookieSettings, GatewayConfig, ServerSettings};
pub use store::JsonFileConfigStore;
