//! File type definitions: how blocks look, how existing references are
//! detected, and how new references are rendered.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::defaults;
use crate::error::{Error, Result};
use crate::scanner::{BLOCK_GROUPS, BlockMatch, BlockScanner, RegexScanner};

/// Placeholder substituted by [`Renderer::Template`].
pub const PATH_PLACEHOLDER: &str = "{{filePath}}";

/// Key of the file type used for unknown extensions.
pub const DEFAULT_FILE_TYPE: &str = "default";

type RenderFn = dyn Fn(&str) -> String + Send + Sync;

/// Produces the text of one reference line from a resolved path.
#[derive(Clone)]
pub enum Renderer {
    /// Text with every `{{filePath}}` replaced by the path.
    Template(String),
    /// Arbitrary rendering.
    Function(Arc<RenderFn>),
}

impl Renderer {
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    pub fn function(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    pub fn render(&self, path: &str) -> String {
        match self {
            Self::Template(template) => template.replace(PATH_PLACEHOLDER, path),
            Self::Function(f) => f(path),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Block syntax and per-block-type reference syntax for one kind of file.
#[derive(Clone)]
pub struct FileType {
    name: String,
    scanner: Arc<dyn BlockScanner>,
    detect: BTreeMap<String, Regex>,
    replace: BTreeMap<String, Renderer>,
}

impl FileType {
    /// Create a file type whose blocks are found with `block_pattern`.
    ///
    /// The pattern is compiled case-insensitively with `.` matching line
    /// breaks and must define the `open`, `indent`, `kind`, `body` and
    /// `close` named groups.
    pub fn new(name: impl Into<String>, block_pattern: &str) -> Result<Self> {
        let name = name.into();
        let block = RegexBuilder::new(block_pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                file_type: name.clone(),
                role: "block".into(),
                source,
            })?;

        let names: Vec<&str> = block.capture_names().flatten().collect();
        if let Some(group) = BLOCK_GROUPS.iter().copied().find(|g| !names.contains(g)) {
            return Err(Error::MissingCaptureGroup {
                file_type: name,
                group,
            });
        }

        Ok(Self::with_scanner(name, Arc::new(RegexScanner::new(block))))
    }

    /// Create a file type that locates blocks with a custom scanner.
    pub fn with_scanner(name: impl Into<String>, scanner: Arc<dyn BlockScanner>) -> Self {
        Self {
            name: name.into(),
            scanner,
            detect: BTreeMap::new(),
            replace: BTreeMap::new(),
        }
    }

    /// Register the pattern that finds existing references of `block_type`.
    ///
    /// The first capture group must hold the referenced path.
    pub fn detect(mut self, block_type: impl Into<String>, pattern: &str) -> Result<Self> {
        let block_type = block_type.into();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                file_type: self.name.clone(),
                role: format!("{block_type} detect"),
                source,
            })?;
        if regex.captures_len() < 2 {
            return Err(Error::MissingReferenceGroup {
                file_type: self.name,
                block_type,
            });
        }
        self.detect.insert(block_type, regex);
        Ok(self)
    }

    /// Register how references of `block_type` are rendered.
    pub fn replace(mut self, block_type: impl Into<String>, renderer: Renderer) -> Self {
        self.replace.insert(block_type.into(), renderer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scan(&self, text: &str) -> Vec<BlockMatch> {
        self.scanner.scan(text)
    }

    pub fn detect_pattern(&self, block_type: &str) -> Option<&Regex> {
        self.detect.get(block_type)
    }

    pub fn has_renderer(&self, block_type: &str) -> bool {
        self.replace.contains_key(block_type)
    }

    /// Render one reference line, or `None` when `block_type` has no renderer.
    pub fn render(&self, block_type: &str, path: &str) -> Option<String> {
        self.replace.get(block_type).map(|r| r.render(path))
    }
}

impl fmt::Debug for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileType")
            .field("name", &self.name)
            .field("detect", &self.detect.keys().collect::<Vec<_>>())
            .field("replace", &self.replace)
            .finish_non_exhaustive()
    }
}

/// Serializable description of a file type, as found in configuration.
///
/// When it names an existing file type, present fields override or extend
/// it; otherwise `block` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub detect: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replace: BTreeMap<String, String>,
}

/// File types keyed by extension, with a `default` fallback.
#[derive(Debug, Clone, Default)]
pub struct FileTypes {
    types: BTreeMap<String, FileType>,
}

impl FileTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in definitions for markup, stylesheet and config formats.
    pub fn builtin() -> Self {
        let mut types = Self::new();
        for (extensions, file_type) in defaults::builtin_file_types() {
            for ext in extensions {
                types.insert(*ext, file_type.clone());
            }
        }
        types
    }

    pub fn insert(&mut self, key: impl Into<String>, file_type: FileType) {
        self.types.insert(key.into().to_lowercase(), file_type);
    }

    pub fn get(&self, key: &str) -> Option<&FileType> {
        self.types.get(&key.to_lowercase())
    }

    /// The file type for `extension`, falling back to `default`.
    pub fn for_extension(&self, extension: &str) -> Option<&FileType> {
        self.get(extension).or_else(|| self.get(DEFAULT_FILE_TYPE))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Apply a configured [`FileTypeConfig`] to the entry under `key`.
    pub fn apply_config(&mut self, key: &str, config: &FileTypeConfig) -> Result<()> {
        let mut file_type = match (&config.block, self.get(key)) {
            (Some(block), _) => {
                let mut fresh = FileType::new(key, block)?;
                if let Some(existing) = self.get(key) {
                    fresh.detect = existing.detect.clone();
                    fresh.replace = existing.replace.clone();
                }
                fresh
            }
            (None, Some(existing)) => existing.clone(),
            (None, None) => return Err(Error::MissingBlockPattern(key.to_string())),
        };

        for (block_type, pattern) in &config.detect {
            file_type = file_type.detect(block_type.as_str(), pattern)?;
        }
        for (block_type, template) in &config.replace {
            file_type = file_type.replace(block_type.as_str(), Renderer::template(template));
        }

        tracing::debug!(file_type = key, "Applied file type configuration");
        self.insert(key, file_type);
        Ok(())
    }
}
