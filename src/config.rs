//! Batch-load options
//!
//! Options are explicit per call. The exclusion set defaults to empty and
//! is always passed by value on the options struct, never shared process
//! state. `from_env` layers environment defaults on top for the CLI:
//!
//! - `TOOLSCOUT_BETA_FORMATS`: enable experimental formats (true|false)

use std::collections::HashSet;
use std::env;
use thiserror::Error;

/// Environment variable enabling experimental tool formats
pub const ENV_BETA_FORMATS: &str = "TOOLSCOUT_BETA_FORMATS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment flag held something other than true/false
    #[error("Failed to parse {var}: expected true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// Options controlling a batch load
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Walk the full subtree instead of immediate children
    pub recursive: bool,

    /// Try experimental formats (YAML) after the XML heuristic
    pub enable_beta_formats: bool,

    /// Record parse failures in the result list instead of dropping them
    pub register_load_errors: bool,

    /// Base names rejected before any content inspection
    pub exclude_names: HashSet<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with environment overlays applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut options = Self::default();
        if let Ok(value) = env::var(ENV_BETA_FORMATS) {
            options.enable_beta_formats = parse_flag(ENV_BETA_FORMATS, &value)?;
        }
        Ok(options)
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn beta_formats(mut self, enable: bool) -> Self {
        self.enable_beta_formats = enable;
        self
    }

    pub fn register_load_errors(mut self, register: bool) -> Self {
        self.register_load_errors = register;
        self
    }

    pub fn exclude_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_names.extend(names.into_iter().map(Into::into));
        self
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
