//! Run orchestration for depinject
//!
//! This crate sits between the block rewriting engine and the CLI:
//!
//! - **Configuration**: [`InjectConfig`], loaded from TOML, JSON or YAML
//! - **Run context**: [`InjectionContext`] compiles file types and
//!   absolutizes every configured path against a working directory
//! - **Package metadata**: [`InjectionContext::package_for`] maps a
//!   dependency file back to the package that provides it
//! - **Events**: [`EventSink`] receives [`PathInjected`] and
//!   [`FileUpdated`] notifications
//! - **Injector**: [`Injector`] rewrites files on disk or text in memory
//!
//! # Architecture
//!
//! ```text
//!                    depinject (CLI)
//!                          |
//!                     inject-core
//!                          |
//!              +-----------+-----------+
//!              |                       |
//!        inject-blocks  ----------> inject-fs
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod injector;

pub use config::{DEFAULT_CONFIG_FILE, DEFAULT_DIRECTORY, DependencySection, InjectConfig};
pub use context::InjectionContext;
pub use error::{Error, Result};
pub use events::{Event, EventSink, FileUpdated, NullSink, PathInjected, RecordingSink, TracingSink};
pub use injector::{FileChange, InjectOptions, InjectionReport, Injector};
