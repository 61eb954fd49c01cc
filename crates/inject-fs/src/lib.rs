//! Filesystem collaborator for dependency reference injection
//!
//! Provides forward-slash path handling, relative path computation,
//! and safe text I/O used around the block rewriting engine.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
