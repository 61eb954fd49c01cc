//! Command implementations for inject-cli

pub mod inject;
pub mod stdin;

pub use inject::run_inject;
pub use stdin::run_stdin;

use std::path::{Path, PathBuf};

use inject_core::{DEFAULT_CONFIG_FILE, InjectConfig, InjectionContext};
use inject_fs::NormalizedPath;
use tracing::debug;

use crate::error::{CliError, Result};

/// Settings given on the command line that win over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub src: Vec<PathBuf>,
    pub ignore_path: Option<String>,
    pub include_self: bool,
}

/// Load the configuration and build the run context.
///
/// Paths inside a configuration file are relative to that file's
/// directory; paths given on the command line are relative to `cwd`.
pub fn load_context(cwd: &Path, overrides: &Overrides) -> Result<InjectionContext> {
    let cwd = NormalizedPath::new(cwd);

    let (mut config, base) = match &overrides.config {
        Some(path) => {
            let path = NormalizedPath::new(path).absolutize(&cwd);
            if !path.is_file() {
                return Err(CliError::user(format!("Configuration file not found: {path}")));
            }
            let base = path.parent().unwrap_or_else(|| cwd.clone());
            (InjectConfig::load(&path)?, base)
        }
        None => {
            let path = cwd.join(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                (InjectConfig::load(&path)?, cwd.clone())
            } else {
                debug!(cwd = %cwd, "No configuration file; using defaults");
                (InjectConfig::default(), cwd.clone())
            }
        }
    };

    if !overrides.src.is_empty() {
        config.src = overrides
            .src
            .iter()
            .map(|p| NormalizedPath::new(p).absolutize(&cwd))
            .collect();
    }
    if let Some(ignore_path) = &overrides.ignore_path {
        config.ignore_path = Some(ignore_path.clone());
        config.ignore_path_pattern = None;
    }
    if overrides.include_self {
        config.include_self = true;
    }

    Ok(InjectionContext::new(&config, &base)?)
}
