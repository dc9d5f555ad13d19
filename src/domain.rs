//! Core configuration types
//!
//! The configuration is a flat string-keyed mapping whose values are JSON
//! booleans or JSON strings, nothing else. `ServerOptions` is the typed view
//! the rest of the application consumes once the mapping is fully resolved.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single configuration value: a JSON boolean or a JSON string.
///
/// Untagged so the persisted file stays a plain JSON object of booleans and
/// strings. Nulls and every other JSON shape fail deserialization, which the
/// loader treats as an unreadable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            ConfigValue::Bool(_) => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

/// The flat configuration mapping. BTreeMap keeps key ordering stable so the
/// persisted file serializes with sorted keys.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Keys the server cannot start without. Required-ness on the command line is
/// computed from this set minus whatever defaults and the saved file already
/// resolve.
pub const REQUIRED_KEYS: &[&str] =
    &["host", "location", "password", "port", "step_limit", "username"];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required keys are still unresolved after merging defaults,
    /// the saved file, and command-line flags. Carries every missing key so
    /// the user sees the full list at once.
    #[error("missing required configuration: {}", .0.iter().map(|k| format!("--{k}")).collect::<Vec<_>>().join(", "))]
    MissingKeys(Vec<String>),

    /// A configuration value has the wrong shape for its typed field, e.g. a
    /// string where a boolean is expected.
    #[error("invalid value for configuration key '{key}'")]
    InvalidValue { key: String },
}

/// Fully-resolved startup options, one field per configuration key.
///
/// This is the options target handed to the web server: a plain struct built
/// once from the final mapping, so the server never sees the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub location: String,
    pub step_limit: String,
    pub debug: bool,
    pub china: bool,
}

impl ServerOptions {
    /// Build typed options from a resolved configuration mapping.
    ///
    /// The mapping must carry every required key; defaulted booleans fall
    /// back to `false` when absent.
    pub fn from_config(config: &ConfigMap) -> Result<Self, ConfigError> {
        let text = |key: &str| -> Result<String, ConfigError> {
            let value = config.get(key).ok_or_else(|| ConfigError::MissingKeys(vec![key.to_string()]))?;
            value
                .as_text()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::InvalidValue { key: key.to_string() })
        };
        let flag = |key: &str| -> Result<bool, ConfigError> {
            match config.get(key) {
                None => Ok(false),
                Some(value) => {
                    value.as_bool().ok_or_else(|| ConfigError::InvalidValue { key: key.to_string() })
                }
            }
        };

        Ok(ServerOptions {
            host: text("host")?,
            port: text("port")?,
            username: text("username")?,
            password: text("password")?,
            location: text("location")?,
            step_limit: text("step_limit")?,
            debug: flag("debug")?,
            china: flag("china")?,
        })
    }
}
