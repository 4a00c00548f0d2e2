// Copyright © 2024 Notiflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Configuration Module
//!
//! Configuration for the decorators Notiflow builds: the encryption marker,
//! the timestamp separator and format, and the default layers of a chain.
//! Values come from a TOML file, environment variables and programmatic
//! overrides, applied in that order.
//!
//! ```toml
//! layers = ["encrypted", "timestamped"]
//!
//! [encryption]
//! marker = "[Encrypted] "
//!
//! [timestamp]
//! separator = " @ "
//! format = "%Y-%m-%dT%H:%M:%S%.f"
//! ```
//!
//! Environment variables use the prefix followed by the key, with `__`
//! between section and field, e.g. `NOTIFLOW_TIMESTAMP__FORMAT`.
//!
//! ## Example
//!
//! ```rust
//! use notiflow::core::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_override("encryption.marker", "[Sealed] ")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.read().encryption.marker, "[Sealed] ");
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use toml::Value as TomlValue;

use crate::chain::Layer;
use crate::core::error::{NotiflowError, Result};
use crate::decorators::timestamped::validate_format;
use crate::decorators::{
    DEFAULT_TIMESTAMP_FORMAT, ENCRYPTED_MARKER, TIMESTAMP_SEPARATOR,
};

/// Represents the main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    /// Settings for the encryption marker decorator.
    pub encryption: EncryptionConfig,

    #[serde(default)]
    /// Settings for the timestamp decorator.
    pub timestamp: TimestampConfig,

    #[serde(default)]
    /// Layers applied around the base message, innermost first.
    pub layers: Vec<Layer>,
}

/// Configuration settings for the encryption marker decorator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    #[serde(default = "default_marker")]
    /// Marker placed in front of the wrapped content.
    pub marker: String,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

/// Configuration settings for the timestamp decorator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampConfig {
    #[serde(default = "default_separator")]
    /// Text placed between the wrapped content and the timestamp.
    pub separator: String,

    #[serde(default = "default_format")]
    /// `strftime` pattern used to render the timestamp.
    pub format: String,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            format: default_format(),
        }
    }
}

/// Builds a `Config` instance from a file, the environment and overrides.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    env_prefix: Option<String>,
    overrides: HashMap<String, TomlValue>,
}

impl ConfigBuilder {
    /// Initialises a new `ConfigBuilder` instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration file to the builder.
    ///
    /// # Parameters
    /// - `path`: The path to the TOML configuration file.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a prefix for environment variables to override configuration values.
    ///
    /// # Parameters
    /// - `prefix`: The prefix for environment variables (e.g., "NOTIFLOW_").
    pub fn with_env_prefix<S: Into<String>>(
        mut self,
        prefix: S,
    ) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Adds a key-value pair to override configuration values.
    ///
    /// # Parameters
    /// - `key`: The configuration key to override, e.g. `timestamp.format`.
    /// - `value`: The new value for the key.
    pub fn with_override<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<TomlValue>,
    {
        _ = self.overrides.insert(key.into(), value.into());
        self
    }

    /// Builds the final configuration by applying all specified settings and overrides.
    ///
    /// Loads configuration from file, applies environment and manual overrides,
    /// and validates the final configuration. Environment variables that do
    /// not name `layers` or a known section are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`NotiflowError::IOError`] if the file cannot be read, or
    /// [`NotiflowError::ConfigError`] if it cannot be parsed, an override
    /// names an unknown key or layer, or the timestamp format is invalid.
    pub fn build(self) -> Result<Arc<RwLock<Config>>> {
        let mut config = if let Some(path) = self.config_file {
            load_from_file(&path)?
        } else {
            Config::default()
        };

        if let Some(prefix) = self.env_prefix {
            apply_env_overrides(&mut config, &prefix)?;
        }

        apply_overrides(&mut config, &self.overrides)?;
        validate_config(&config)?;

        Ok(Arc::new(RwLock::new(config)))
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotiflowError::ConfigError`] if the timestamp format is
    /// empty or cannot render a local date-time.
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}

// Internal helper functions

fn load_from_file(path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path)
        .map_err(|e| NotiflowError::io_error(path.to_path_buf(), e))?;

    toml::from_str(&content).map_err(|e| {
        NotiflowError::config_error(
            format!("Failed to parse config file: {}", e),
            Some(path.to_path_buf()),
        )
    })
}

fn apply_env_overrides(config: &mut Config, prefix: &str) -> Result<()> {
    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(prefix) {
            let config_key = stripped
                .trim_start_matches('_')
                .to_lowercase()
                .replace("__", ".");
            if !is_known_key(&config_key) {
                debug!("Ignoring environment variable `{}`", key);
                continue;
            }
            debug!("Applying environment override for `{}`", config_key);
            apply_config_value(config, &config_key, &value)?;
        }
    }
    Ok(())
}

/// Whether `key` names `layers` or a field of a known section. Unknown
/// fields of a known section are still rejected by `apply_config_value`.
fn is_known_key(key: &str) -> bool {
    key == "layers"
        || matches!(
            key.split_once('.'),
            Some(("encryption" | "timestamp", _))
        )
}

fn apply_overrides(
    config: &mut Config,
    overrides: &HashMap<String, TomlValue>,
) -> Result<()> {
    for (key, value) in overrides {
        apply_config_value(config, key, &toml_to_text(value))?;
    }
    Ok(())
}

fn toml_to_text(value: &TomlValue) -> String {
    match value {
        TomlValue::String(s) => s.clone(),
        TomlValue::Array(items) => items
            .iter()
            .map(toml_to_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn validate_config(config: &Config) -> Result<()> {
    validate_format(&config.timestamp.format)
}

fn apply_config_value(
    config: &mut Config,
    key: &str,
    value: &str,
) -> Result<()> {
    match key {
        "layers" => {
            config.layers = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Layer>())
                .collect::<Result<Vec<Layer>>>()?;
        }
        _ => {
            let Some((section, field)) = key.split_once('.') else {
                return Err(NotiflowError::config_error(
                    format!("Unknown configuration key: {}", key),
                    None,
                ));
            };
            match (section, field) {
                ("encryption", "marker") => {
                    config.encryption.marker = value.to_string();
                }
                ("timestamp", "separator") => {
                    config.timestamp.separator = value.to_string();
                }
                ("timestamp", "format") => {
                    config.timestamp.format = value.to_string();
                }
                ("encryption" | "timestamp", _) => {
                    return Err(NotiflowError::config_error(
                        format!("Unknown configuration key: {}", key),
                        None,
                    ));
                }
                _ => {
                    return Err(NotiflowError::config_error(
                        format!("Unknown configuration section: {}", section),
                        None,
                    ));
                }
            }
        }
    }
    Ok(())
}

// Default value functions
fn default_marker() -> String {
    ENCRYPTED_MARKER.to_string()
}

fn default_separator() -> String {
    TIMESTAMP_SEPARATOR.to_string()
}

fn default_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

/// Tests for the configuration module.
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_decorators() {
        let config = Config::default();
        assert_eq!(config.encryption.marker, "[Encrypted] ");
        assert_eq!(config.timestamp.separator, " @ ");
        assert_eq!(config.timestamp.format, DEFAULT_TIMESTAMP_FORMAT);
        assert!(config.layers.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("notiflow.toml");
        fs::write(
            &config_file,
            "layers = ['encrypted', 'timestamped']\n\n[timestamp]\nseparator = ' at '\n",
        )
        .unwrap();

        let config = load_from_file(&config_file).unwrap();
        assert_eq!(config.layers, vec![Layer::Encrypted, Layer::Timestamped]);
        assert_eq!(config.timestamp.separator, " at ");
        assert_eq!(config.timestamp.format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(config.encryption.marker, "[Encrypted] ");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_file(Path::new("does-not-exist.toml"));
        assert!(matches!(result, Err(NotiflowError::IOError { .. })));
    }

    #[test]
    fn test_unknown_layer_in_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("notiflow.toml");
        fs::write(&config_file, "layers = ['zipped']\n").unwrap();

        let result = load_from_file(&config_file);
        assert!(matches!(result, Err(NotiflowError::ConfigError { .. })));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let mut overrides = HashMap::new();
        _ = overrides.insert(
            "timestamp.format".to_string(),
            TomlValue::String("%H:%M".to_string()),
        );
        _ = overrides.insert(
            "layers".to_string(),
            TomlValue::Array(vec![
                TomlValue::String("timestamped".to_string()),
                TomlValue::String("encrypted".to_string()),
            ]),
        );

        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.timestamp.format, "%H:%M");
        assert_eq!(config.layers, vec![Layer::Timestamped, Layer::Encrypted]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut config = Config::default();
        assert!(apply_config_value(&mut config, "colour", "red").is_err());
        assert!(
            apply_config_value(&mut config, "delivery.retry", "3").is_err()
        );
        assert!(
            apply_config_value(&mut config, "timestamp.zone", "UTC").is_err()
        );
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("NFCFGTEST_TIMESTAMP__SEPARATOR", " ~ ");
        env::set_var("NFCFGTEST_ENCRYPTION__MARKER", "[Locked] ");
        let mut config = Config::default();

        apply_env_overrides(&mut config, "NFCFGTEST_").unwrap();
        assert_eq!(config.timestamp.separator, " ~ ");
        assert_eq!(config.encryption.marker, "[Locked] ");

        env::remove_var("NFCFGTEST_TIMESTAMP__SEPARATOR");
        env::remove_var("NFCFGTEST_ENCRYPTION__MARKER");
    }

    #[test]
    fn test_env_ignores_unrelated_variables() {
        env::set_var("NFENVSKIP_HOME", "/home/notiflow");
        env::set_var("NFENVSKIP_DELIVERY__RETRY", "3");
        let mut config = Config::default();

        let result = apply_env_overrides(&mut config, "NFENVSKIP_");
        env::remove_var("NFENVSKIP_HOME");
        env::remove_var("NFENVSKIP_DELIVERY__RETRY");

        assert!(result.is_ok());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_rejects_unknown_field_of_known_section() {
        env::set_var("NFENVBAD_TIMESTAMP__ZONE", "UTC");
        let mut config = Config::default();

        let result = apply_env_overrides(&mut config, "NFENVBAD_");
        env::remove_var("NFENVBAD_TIMESTAMP__ZONE");

        assert!(matches!(result, Err(NotiflowError::ConfigError { .. })));
    }

    #[test]
    fn test_builder_rejects_invalid_format() {
        let result = ConfigBuilder::new()
            .with_override("timestamp.format", "%Q")
            .build();
        assert!(matches!(result, Err(NotiflowError::ConfigError { .. })));
    }

    #[test]
    fn test_builder_rejects_offset_format() {
        for format in ["%z", "%Z"] {
            let result = ConfigBuilder::new()
                .with_override("timestamp.format", format)
                .build();
            assert!(matches!(result, Err(NotiflowError::ConfigError { .. })));
        }
    }

    #[test]
    fn test_builder_reads_file_then_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("notiflow.toml");
        fs::write(&config_file, "[encryption]\nmarker = '[File] '\n")
            .unwrap();

        let config = ConfigBuilder::new()
            .with_file(&config_file)
            .with_override("encryption.marker", "[Override] ")
            .build()
            .unwrap();
        assert_eq!(config.read().encryption.marker, "[Override] ");
        assert!(config.read().validate().is_ok());
    }
}
