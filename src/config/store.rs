//! Reading and writing `config.json`
//!
//! The saved file is best-effort state from the previous run: any read or
//! parse failure falls back to an empty mapping so startup never blocks on a
//! corrupt file. Writes are unconditional and do propagate failures.

use crate::domain::{ConfigMap, ConfigValue};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name of the persisted configuration, resolved against the working
/// directory of the run.
pub const CONFIG_FILE: &str = "config.json";

/// Built-in defaults for the keys that have one. `username`, `password` and
/// `location` have no default and must come from the saved file or a flag.
pub fn defaults() -> ConfigMap {
    let mut map = ConfigMap::new();
    map.insert("china".into(), ConfigValue::Bool(false));
    map.insert("debug".into(), ConfigValue::Bool(false));
    map.insert("host".into(), ConfigValue::Text("127.0.0.1".into()));
    map.insert("port".into(), ConfigValue::Text("5000".into()));
    map.insert("step_limit".into(), ConfigValue::Text("10".into()));
    map
}

/// Load the saved configuration from `dir/config.json`.
///
/// Missing, unreadable, or malformed files yield an empty mapping; the
/// failure is logged at debug level and never propagated. Keys saved with a
/// JSON null are dropped.
pub fn load_saved(dir: &Path) -> ConfigMap {
    let path = dir.join(CONFIG_FILE);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No saved config at {}: {}", path.display(), e);
            return ConfigMap::new();
        }
    };

    // Nulls are legal in the file but dropped here; any other non-string,
    // non-boolean value makes the file malformed as a whole.
    let parsed: BTreeMap<String, Option<ConfigValue>> = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Ignoring malformed config {}: {}", path.display(), e);
            return ConfigMap::new();
        }
    };

    parsed.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))).collect()
}

/// Overwrite `dir/config.json` with `config`, sorted keys, pretty-printed,
/// trailing newline. Runs on every resolve, changed or not.
pub fn persist(dir: &Path, config: &ConfigMap) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    let mut body = serde_json::to_string_pretty(config).context("Failed serializing config")?;
    body.push('\n');
    fs::write(&path, body)
        .with_context(|| format!("Failed writing config file: {}", path.display()))
}
