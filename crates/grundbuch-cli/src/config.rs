//! Configuration lookup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use grundbuch_core::ScriptConfig;

/// Per-user config file, `<config_dir>/grundbuch-script/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grundbuch-script").join("config.json"))
}

/// Load the configuration: an explicit path must exist, the per-user file is
/// used when present, otherwise defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<ScriptConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file, using defaults");
                return Ok(ScriptConfig::default());
            }
        },
    };

    debug!(path = %path.display(), "loading config");
    ScriptConfig::from_file(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}
