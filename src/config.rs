use crate::constants::DEFAULT_LOG_LEVEL;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Output and logging settings, optionally loaded from a TOML file.
///
/// Every field has a default, so an empty file is valid. The marker tokens of
/// the input format are deliberately not part of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Pretty-print the JSON output
    pub pretty: bool,
    /// Create the output directory (grouped mode) or the output file's parent
    /// directory (combined mode) before writing
    pub create_output_dir: bool,
    /// `tracing` filter directive, e.g. `"info"` or `"tzkml2json=debug"`
    pub log_level: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            create_output_dir: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Unknown keys are rejected so typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, and `InvalidConfig` if the TOML
    /// is malformed, holds unknown keys, or `log_level` is not a valid filter.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let config: ConverterConfig = toml::from_str(contents)
            .map_err(|e| AppError::InvalidConfig(format!("Failed to parse config: {e}")))?;
        config.log_filter()?;
        Ok(config)
    }

    pub fn log_filter(&self) -> AppResult<EnvFilter> {
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            AppError::InvalidConfig(format!("Invalid log_level '{}': {e}", self.log_level))
        })
    }
}
