//! Runtime configuration for the builtin tool runner
//!
//! The only configurable concern is the environment list handed to
//! builtins. Everything else about a builtin call is fixed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub environment: EnvironmentSection,
}

/// Environment section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentSection {
    /// Forward the process environment to builtins
    #[serde(default)]
    pub inherit: bool,
    /// Extra variables appended after the inherited ones
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid environment variable name: {0}")]
    InvalidEnvName(String),
}

impl RuntimeConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;

        for name in config.environment.vars.keys() {
            validate_env_name(name)?;
        }

        Ok(config)
    }

    /// Build the ordered `KEY=VALUE` list passed to builtins.
    ///
    /// Order: inherited process variables sorted by name, then configured
    /// variables sorted by name, then `extra` as given.
    pub fn handler_env(&self, extra: &[String]) -> Vec<String> {
        let mut env = Vec::new();

        if self.environment.inherit {
            let mut inherited: Vec<(String, String)> = std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect();
            inherited.sort();
            env.extend(inherited.into_iter().map(|(k, v)| format!("{k}={v}")));
        }

        env.extend(
            self.environment
                .vars
                .iter()
                .map(|(k, v)| format!("{k}={v}")),
        );
        env.extend(extra.iter().cloned());

        env
    }
}

/// Validate an environment variable name (non-empty, no `=`)
fn validate_env_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.contains('=') {
        return Err(ConfigError::InvalidEnvName(format!(
            "'{name}' must be non-empty and must not contain '='"
        )));
    }
    Ok(())
}

/// Parse a `KEY=VALUE` entry given on the command line
pub fn parse_env_entry(entry: &str) -> Result<String, ConfigError> {
    match entry.split_once('=') {
        Some((name, _)) => {
            validate_env_name(name)?;
            Ok(entry.to_string())
        }
        None => Err(ConfigError::InvalidEnvName(format!(
            "'{entry}' is not of the form KEY=VALUE"
        ))),
    }
}
