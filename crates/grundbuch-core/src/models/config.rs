//! Configuration structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vocabulary::Currency;

/// Main configuration for routine invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Named patterns available to every invocation.
    ///
    /// Entries here override the built-in defaults; the `re` map of a single
    /// invocation overrides these in turn.
    pub regex: BTreeMap<String, String>,

    /// Text handling settings.
    pub text: TextConfig,

    /// Extraction settings.
    pub extraction: ExtractionConfig,
}

/// Text handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Abbreviations after which a period does not end a sentence.
    pub abbreviations: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            abbreviations: [
                "Abt", "Nr", "lfd", "Flst", "Flurst", "gem", "Dr", "Str", "bzw", "vgl", "v", "z",
                "geb", "Bl", "BV", "Gemark", "Urk", "UR", "ZVG", "BGB", "GBO", "Ltd", "ca", "Ziff",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency assumed when an amount carries no currency symbol.
    pub default_currency: Currency,

    /// Record a warning when a serial number appears twice in column 1.
    pub warn_on_duplicate_serials: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::Euro,
            warn_on_duplicate_serials: true,
        }
    }
}

impl ScriptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }
}
