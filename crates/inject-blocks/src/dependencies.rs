//! The ordered dependency files to inject, per block type.

use inject_fs::NormalizedPath;
use std::collections::BTreeMap;

/// Block type to dependency files, in dependency resolution order.
///
/// The order of each list is significant and preserved exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedDependencies {
    by_type: BTreeMap<String, Vec<NormalizedPath>>,
}

impl SortedDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the list for `block_type`.
    pub fn push(&mut self, block_type: impl Into<String>, path: impl Into<NormalizedPath>) {
        self.by_type
            .entry(block_type.into())
            .or_default()
            .push(path.into());
    }

    pub fn insert(&mut self, block_type: impl Into<String>, paths: Vec<NormalizedPath>) {
        self.by_type.insert(block_type.into(), paths);
    }

    /// The list for `block_type`; empty when the type is unknown.
    pub fn get(&self, block_type: &str) -> &[NormalizedPath] {
        self.by_type.get(block_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NormalizedPath])> {
        self.by_type.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Apply `f` to every path, keeping types and order.
    pub fn map_paths(&self, mut f: impl FnMut(&NormalizedPath) -> NormalizedPath) -> Self {
        let by_type = self
            .by_type
            .iter()
            .map(|(k, v)| (k.clone(), v.iter().map(&mut f).collect()))
            .collect();
        Self { by_type }
    }
}

impl<K, P> FromIterator<(K, Vec<P>)> for SortedDependencies
where
    K: Into<String>,
    P: Into<NormalizedPath>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<P>)>>(iter: I) -> Self {
        let by_type = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { by_type }
    }
}
