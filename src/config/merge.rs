//! Configuration merging
//!
//! Three precedence layers: built-in defaults, the saved file, then
//! command-line overrides, highest wins. Which flags are mandatory is decided
//! per run, after the first two layers merge: a key already resolvable from
//! defaults or the saved file never has to be passed again.

use crate::config::store::{defaults, load_saved, persist};
use crate::domain::{ConfigError, ConfigMap, ConfigValue, ServerOptions, REQUIRED_KEYS};
use anyhow::Result;
use std::path::Path;

/// Command-line values lifted out of the parser. `None` means the flag was
/// not supplied; only supplied values override lower layers, so an absent
/// switch leaves a saved boolean alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub step_limit: Option<String>,
    pub debug: Option<bool>,
    pub china: Option<bool>,
}

impl CliOverrides {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        match key {
            "host" => self.host.clone().map(ConfigValue::Text),
            "port" => self.port.clone().map(ConfigValue::Text),
            "username" => self.username.clone().map(ConfigValue::Text),
            "password" => self.password.clone().map(ConfigValue::Text),
            "location" => self.location.clone().map(ConfigValue::Text),
            "step_limit" => self.step_limit.clone().map(ConfigValue::Text),
            "debug" => self.debug.map(ConfigValue::Bool),
            "china" => self.china.map(ConfigValue::Bool),
            _ => None,
        }
    }

    fn keys() -> &'static [&'static str] {
        &["host", "port", "username", "password", "location", "step_limit", "debug", "china"]
    }
}

/// Overlay the saved configuration onto the defaults, producing the
/// intermediate "known configuration".
pub fn merge_defaults_with_saved(defaults: ConfigMap, saved: ConfigMap) -> ConfigMap {
    let mut known = defaults;
    known.extend(saved);
    known
}

/// Required keys not resolvable from the known configuration. These are the
/// flags that are mandatory for this particular run.
pub fn unresolved_keys(known: &ConfigMap) -> Vec<String> {
    REQUIRED_KEYS
        .iter()
        .filter(|key| !known.contains_key(**key))
        .map(|key| key.to_string())
        .collect()
}

/// Check that every unresolved required key was supplied on the command line,
/// reporting all missing keys in a single error.
pub fn validate_required(known: &ConfigMap, overrides: &CliOverrides) -> Result<(), ConfigError> {
    let missing: Vec<String> = unresolved_keys(known)
        .into_iter()
        .filter(|key| overrides.get(key).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingKeys(missing))
    }
}

/// Overlay supplied command-line values onto the known configuration.
pub fn merge_cli_with_config(known: ConfigMap, overrides: &CliOverrides) -> ConfigMap {
    let mut merged = known;
    for key in CliOverrides::keys() {
        if let Some(value) = overrides.get(key) {
            merged.insert(key.to_string(), value);
        }
    }
    merged
}

/// The whole resolve pass: load, merge, validate, override, persist, apply.
///
/// `dir` is where `config.json` lives (the CLI passes the working directory).
/// Returns the final mapping alongside the typed options the server consumes.
pub fn resolve(dir: &Path, overrides: &CliOverrides) -> Result<(ConfigMap, ServerOptions)> {
    let known = merge_defaults_with_saved(defaults(), load_saved(dir));
    validate_required(&known, overrides)?;

    let merged = merge_cli_with_config(known, overrides);
    persist(dir, &merged)?;

    let options = ServerOptions::from_config(&merged)?;
    Ok((merged, options))
}
