//! Block rewriting engine for dependency reference injection.
//!
//! Finds marker-delimited blocks in source text and rewrites them to
//! reference an ordered list of dependency files:
//!
//! ```text
//! <!-- bower:js -->
//! <script src="bower_components/jquery/dist/jquery.js"></script>
//! <!-- endbower -->
//! ```
//!
//! The engine is split into four pieces:
//!
//! - [`scanner`]: locates blocks (regex-driven by default, swappable
//!   through [`BlockScanner`])
//! - [`resolver`]: turns an absolute dependency path into a path relative
//!   to the consumer file
//! - [`tracker`]: remembers references already present in the file so
//!   they are never injected twice
//! - [`rewriter`]: ties the above together and renders each block with
//!   the per-type [`Renderer`] of its [`FileType`]
//!
//! Rewriting is pure: it never reads or writes files and returns a
//! [`Rewrite`] describing the new text and every reference it injected.

pub mod defaults;
pub mod dependencies;
pub mod error;
pub mod file_type;
pub mod resolver;
pub mod rewriter;
pub mod scanner;
pub mod tracker;

pub use dependencies::SortedDependencies;
pub use error::{Error, Result};
pub use file_type::{FileType, FileTypeConfig, FileTypes, Renderer};
pub use resolver::{IgnorePath, PathResolver};
pub use rewriter::{BlockRewriter, DEFAULT_BLOCK_TYPE, Injected, Rewrite};
pub use scanner::{BlockMatch, BlockScanner, LineEnding, RegexScanner};
pub use tracker::DuplicateTracker;
