//! Format-agnostic configuration loading

use crate::{Error, NormalizedPath, Result, io};
use serde::de::DeserializeOwned;

/// Format-agnostic configuration store.
///
/// Automatically detects format from file extension and handles
/// deserialization transparently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or("");
        let format = match extension.to_lowercase().as_str() {
            "toml" => "TOML",
            "json" => "JSON",
            "yaml" | "yml" => "YAML",
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.to_string(),
                });
            }
        };

        let content = io::read_text(path)?;
        tracing::debug!(path = %path, format, "Loading configuration");

        let parse_error = |message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match format {
            "TOML" => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
            "JSON" => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        }
    }
}
