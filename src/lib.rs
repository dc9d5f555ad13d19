//! scan-config: startup configuration resolver for the map-scan web server
//!
//! Merges built-in defaults, the saved `config.json`, and command-line flags
//! (highest precedence last), persists the merged result, and exposes it as a
//! typed [`domain::ServerOptions`] for the server to consume.

pub mod cli;
pub mod config;
pub mod domain;

pub use config::{resolve, CliOverrides};
pub use domain::{ConfigError, ConfigMap, ConfigValue, ServerOptions};
