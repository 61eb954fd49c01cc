//! Path resolution from a consumer file to a dependency file.

use inject_fs::NormalizedPath;
use regex::Regex;

/// A fragment removed from every resolved path.
#[derive(Debug, Clone)]
pub enum IgnorePath {
    /// Remove the first occurrence of this text.
    Literal(String),
    /// Remove the first match of this pattern.
    Pattern(Regex),
}

impl IgnorePath {
    fn strip(&self, path: &str) -> String {
        match self {
            Self::Literal(fragment) if fragment.is_empty() => path.to_string(),
            Self::Literal(fragment) => path.replacen(fragment.as_str(), "", 1),
            Self::Pattern(pattern) => pattern.replace(path, "").into_owned(),
        }
    }
}

/// Computes the path written into a reference line.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    ignore: Option<IgnorePath>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore(ignore: IgnorePath) -> Self {
        Self {
            ignore: Some(ignore),
        }
    }

    /// Resolve `dependency` relative to the directory holding `consumer`.
    ///
    /// Separators are normalized to `/` before the ignore path is removed,
    /// so the same configuration works on every platform. Both paths are
    /// expected to be absolute.
    ///
    /// # Example
    /// ```
    /// use inject_blocks::PathResolver;
    /// use inject_fs::NormalizedPath;
    ///
    /// let resolved = PathResolver::new().resolve(
    ///     &NormalizedPath::new("/proj/index.html"),
    ///     &NormalizedPath::new("/proj/managed/pkgA/dist/pkgA.js"),
    /// );
    /// assert_eq!(resolved, "managed/pkgA/dist/pkgA.js");
    /// ```
    pub fn resolve(&self, consumer: &NormalizedPath, dependency: &NormalizedPath) -> String {
        let here = NormalizedPath::new(".");
        let consumer_dir = consumer.parent().unwrap_or_else(|| here.clone());
        let dependency_dir = dependency.parent().unwrap_or(here);

        let relative_dir = dependency_dir.relative_to(&consumer_dir);
        let file_name = dependency.file_name().unwrap_or_default();
        let relative = relative_dir.join(file_name);

        match &self.ignore {
            Some(ignore) => ignore.strip(relative.as_str()),
            None => relative.as_str().to_string(),
        }
    }
}
