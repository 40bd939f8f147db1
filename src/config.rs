//! Optional TOML configuration file.
//!
//! ```toml
//! output = "pretty"
//! log_filter = "randkit_engine=debug"
//!
//! [defaults.password]
//! length = 24
//! exclude_ambiguous = true
//!
//! [defaults.lotto]
//! pool_a = { min = 1, max = 49, pick = 6 }
//! pool_b = { pick = 0 }
//! ```
//!
//! Mode names under `defaults` accept the same aliases as the command line.

use crate::output::OutputFormat;
use randkit_core::GeneratorMode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unknown mode in [defaults]: {0}")]
    UnknownMode(String),

    #[error("Defaults for '{0}' must be a table")]
    NotATable(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    output: Option<OutputFormat>,
    log_filter: Option<String>,
    defaults: HashMap<String, Value>,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandkitConfig {
    /// Output format used when `--format` is not given
    pub output: Option<OutputFormat>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
    defaults: HashMap<GeneratorMode, Value>,
}

impl RandkitConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let mut defaults = HashMap::new();
        for (name, table) in raw.defaults {
            let mode: GeneratorMode = name.parse().map_err(|_| ConfigError::UnknownMode(name.clone()))?;
            if !table.is_object() {
                return Err(ConfigError::NotATable(name));
            }
            defaults.insert(mode, table);
        }
        Ok(Self {
            output: raw.output,
            log_filter: raw.log_filter,
            defaults,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Default parameters configured for `mode`, as a JSON object.
    pub fn defaults_for(&self, mode: GeneratorMode) -> Option<&Value> {
        self.defaults.get(&mode)
    }
}
