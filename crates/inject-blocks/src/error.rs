//! Error types for inject-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {role} pattern for file type '{file_type}': {source}")]
    InvalidPattern {
        file_type: String,
        role: String,
        #[source]
        source: regex::Error,
    },

    #[error("Block pattern for file type '{file_type}' is missing the '{group}' capture group")]
    MissingCaptureGroup {
        file_type: String,
        group: &'static str,
    },

    #[error("Detect pattern for block type '{block_type}' in file type '{file_type}' has no capture group")]
    MissingReferenceGroup {
        file_type: String,
        block_type: String,
    },

    #[error("File type '{0}' has no block pattern")]
    MissingBlockPattern(String),
}
