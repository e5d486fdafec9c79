//! Config-driven device construction.
//!
//! This module provides a small TOML-backed configuration for opening a
//! device by name from a config file instead of a hard-coded string.
//!
//! ```toml
//! # libad4.toml
//! device = "usbbase:0"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::device::Libad4Device;
use crate::error::Result;

/// Errors that can occur while loading a device configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found
    #[error("config file not found: {0}")]
    NotFound(String),

    /// File read error
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Parse error (invalid TOML)
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a LIBAD4 device connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Libad4Config {
    /// Device name passed verbatim to the native open call, format
    /// `<family>[:<unit-or-@serial-or-ip>]`.
    pub device: String,
}

impl Libad4Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "loading LIBAD4 device config");

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Open the device named by a configuration.
pub fn open_device(config: &Libad4Config) -> Result<Libad4Device> {
    Libad4Device::open(&config.device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_config() {
        let config = Libad4Config::from_toml_str(r#"device = "usbbase:0""#)
            .expect("minimal config must parse");
        assert_eq!(config.device, "usbbase:0");
    }

    #[test]
    fn test_parse_rejects_missing_device() {
        let err = Libad4Config::from_toml_str("").expect_err("empty config must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, r#"device = "lanbase:192.168.1.5""#).expect("write config");

        let config = Libad4Config::from_toml_file(file.path()).expect("config must load");
        assert_eq!(config.device, "lanbase:192.168.1.5");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Libad4Config::from_toml_file(Path::new("/nonexistent/libad4.toml"))
            .expect_err("missing file must fail");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Libad4Config {
            device: "usbbase:@157".to_string(),
        };
        let raw = toml::to_string(&config).expect("serialize");
        let parsed = Libad4Config::from_toml_str(&raw).expect("reparse");
        assert_eq!(parsed.device, config.device);
    }
}
