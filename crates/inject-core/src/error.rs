//! Error types for inject-core

/// Result type for inject-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while injecting references
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dependency path does not lie under the managed directory
    #[error("Cannot determine the package of {path}: it is not under {directory}")]
    UnresolvablePackage { path: String, directory: String },

    /// The package named by the dependency path has no metadata
    #[error("Package '{name}' (from {path}) is not among the resolved dependencies")]
    UnknownPackage { name: String, path: String },

    /// No file type is registered under the requested key
    #[error("Unknown file type: {key}")]
    UnknownFileType { key: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Processing of one consumer file failed
    #[error("Failed to inject into {path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<Error>,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from inject-fs
    #[error(transparent)]
    Fs(#[from] inject_fs::Error),

    /// Block definition error from inject-blocks
    #[error(transparent)]
    Blocks(#[from] inject_blocks::Error),
}

impl Error {
    /// Wrap `source` with the consumer file it occurred in.
    pub fn in_file(path: impl std::fmt::Display, source: Error) -> Self {
        Self::File {
            path: path.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
