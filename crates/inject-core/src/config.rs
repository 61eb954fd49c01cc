//! Run configuration.
//!
//! An [`InjectConfig`] is usually read from `depinject.toml`, but any
//! format [`ConfigStore`] understands works:
//!
//! ```toml
//! directory = "bower_components"
//! src = ["index.html", "app/styles/main.scss"]
//!
//! [file_types.html.replace]
//! js = '<script defer src="{{filePath}}"></script>'
//!
//! [dependencies.packages.jquery]
//! name = "jquery"
//! main = "dist/jquery.js"
//!
//! [dependencies.sorted]
//! js = ["bower_components/jquery/dist/jquery.js"]
//! ```

use inject_blocks::{DEFAULT_BLOCK_TYPE, FileTypeConfig, FileTypes, IgnorePath};
use inject_fs::{ConfigStore, NormalizedPath};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Error, Result};

/// File name looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "depinject.toml";

/// Directory holding installed packages when none is configured.
pub const DEFAULT_DIRECTORY: &str = "bower_components";

/// Resolved dependencies of the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencySection {
    /// Package name to package metadata
    #[serde(default)]
    pub packages: BTreeMap<String, Value>,

    /// Block type to dependency files, in injection order
    #[serde(default)]
    pub sorted: BTreeMap<String, Vec<NormalizedPath>>,
}

/// Everything one injection run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectConfig {
    /// Managed dependency directory
    pub directory: NormalizedPath,

    /// Literal prefix removed from every reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_path: Option<String>,

    /// Regex whose first match is removed from every reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_path_pattern: Option<String>,

    /// Files outside the managed directory belong to the project itself
    pub include_self: bool,

    /// Metadata of the project itself
    #[serde(skip_serializing_if = "Value::is_null")]
    pub package: Value,

    /// Consumer files to process
    pub src: Vec<NormalizedPath>,

    /// Block type of markers that do not declare one
    pub fallback_type: String,

    /// Overrides and additions to the built-in file types
    pub file_types: BTreeMap<String, FileTypeConfig>,

    pub dependencies: DependencySection,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            directory: NormalizedPath::new(DEFAULT_DIRECTORY),
            ignore_path: None,
            ignore_path_pattern: None,
            include_self: false,
            package: Value::Null,
            src: Vec::new(),
            fallback_type: DEFAULT_BLOCK_TYPE.to_string(),
            file_types: BTreeMap::new(),
            dependencies: DependencySection::default(),
        }
    }
}

impl InjectConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        config.validate()?;
        debug!(
            path = %path,
            sources = config.src.len(),
            packages = config.dependencies.packages.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Check that every pattern compiles and required values are present.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_str().trim().is_empty() {
            return Err(Error::invalid_config("directory must not be empty"));
        }
        if self.fallback_type.trim().is_empty() {
            return Err(Error::invalid_config("fallback_type must not be empty"));
        }
        self.ignore()?;
        self.file_types()?;
        Ok(())
    }

    /// The configured ignore path, if any.
    pub fn ignore(&self) -> Result<Option<IgnorePath>> {
        match (&self.ignore_path, &self.ignore_path_pattern) {
            (Some(_), Some(_)) => Err(Error::invalid_config(
                "ignore_path and ignore_path_pattern are mutually exclusive",
            )),
            (Some(literal), None) => Ok(Some(IgnorePath::Literal(literal.clone()))),
            (None, Some(pattern)) => Regex::new(pattern)
                .map(|regex| Some(IgnorePath::Pattern(regex)))
                .map_err(|e| Error::invalid_config(format!("ignore_path_pattern: {e}"))),
            (None, None) => Ok(None),
        }
    }

    /// Built-in file types with the configured overrides applied.
    pub fn file_types(&self) -> Result<FileTypes> {
        let mut types = FileTypes::builtin();
        for (key, overrides) in &self.file_types {
            types.apply_config(key, overrides)?;
        }
        Ok(types)
    }
}
