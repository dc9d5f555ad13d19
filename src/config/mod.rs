//! Configuration loading and merging
//!
//! Handles loading from the saved `config.json` and CLI arguments with
//! proper precedence (CLI > File > Defaults), then persists the merged
//! result for the next run.

pub mod merge;
pub mod store;

pub use merge::{merge_cli_with_config, resolve, validate_required, CliOverrides};
pub use store::{defaults, load_saved, persist, CONFIG_FILE};
