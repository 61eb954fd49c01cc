//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries. All path arithmetic
/// (`clean`, `relative_to`, `absolutize`) is lexical and never touches
/// the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// The process working directory, without Windows verbatim prefixes.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Ok(Self::new(dunce::simplified(&cwd)))
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Whether the path starts at a root (`/`, `//server`, or a drive letter).
    pub fn is_absolute(&self) -> bool {
        !split_root(&self.inner).0.is_empty()
    }

    /// Fold `.` and `..` segments and collapse repeated separators.
    ///
    /// `..` never climbs above the root of an absolute path. An empty
    /// relative result is `.`.
    pub fn clean(&self) -> Self {
        let (root, rest) = split_root(&self.inner);
        let mut parts: Vec<&str> = Vec::new();

        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if !root.is_empty() => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }

        let joined = parts.join("/");
        let inner = if root.is_empty() && joined.is_empty() {
            ".".to_string()
        } else {
            format!("{root}{joined}")
        };
        Self { inner }
    }

    /// Compute the path that leads from `base` to `self`.
    ///
    /// Both paths are cleaned first. Returns an empty path when they are
    /// the same, and `self` unchanged when the two live under different
    /// roots (for example different drive letters).
    pub fn relative_to(&self, base: &NormalizedPath) -> Self {
        let target = self.clean();
        let base = base.clean();

        let (target_root, target_rest) = split_root(&target.inner);
        let (base_root, base_rest) = split_root(&base.inner);
        if !target_root.eq_ignore_ascii_case(base_root) {
            return target;
        }

        let target_parts = segments(target_rest);
        let base_parts = segments(base_rest);
        let common = target_parts
            .iter()
            .zip(&base_parts)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts = vec![".."; base_parts.len() - common];
        parts.extend_from_slice(&target_parts[common..]);
        Self {
            inner: parts.join("/"),
        }
    }

    /// Resolve a relative path against `cwd`; absolute paths are only cleaned.
    pub fn absolutize(&self, cwd: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clean()
        } else {
            cwd.join(&self.inner).clean()
        }
    }
}

/// Split a normalized path into its root prefix and the remainder.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if path.starts_with("//") && !path.starts_with("///") {
        path.split_at(2)
    } else if path.starts_with('/') {
        path.split_at(1)
    } else if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.get(2) == Some(&b'/') {
            path.split_at(3)
        } else {
            path.split_at(2)
        }
    } else {
        ("", path)
    }
}

fn segments(rest: &str) -> Vec<&str> {
    rest.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> serde::Deserialize<'de> for NormalizedPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_root_recognizes_drive_letters() {
        assert_eq!(split_root("C:/proj/app"), ("C:/", "proj/app"));
        assert_eq!(split_root("//server/share"), ("//", "server/share"));
        assert_eq!(split_root("/usr/lib"), ("/", "usr/lib"));
        assert_eq!(split_root("lib/x"), ("", "lib/x"));
    }

    #[test]
    fn clean_does_not_climb_above_root() {
        let path = NormalizedPath::new("/a/../../b");
        assert_eq!(path.clean().as_str(), "/b");
    }

    #[test]
    fn clean_keeps_leading_parent_segments_for_relative_paths() {
        let path = NormalizedPath::new("../../a/./b/../c");
        assert_eq!(path.clean().as_str(), "../../a/c");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let path: NormalizedPath = serde_json::from_str(r#""lib\\a.js""#).unwrap();
        assert_eq!(path.as_str(), "lib/a.js");
        assert_eq!(serde_json::to_string(&path).unwrap(), r#""lib/a.js""#);
    }

    #[test]
    fn relative_to_same_directory_is_empty() {
        let a = NormalizedPath::new("/proj/app");
        assert_eq!(a.relative_to(&NormalizedPath::new("/proj/app/")).as_str(), "");
    }
}
