//! Configuration System
//!
//! Layered configuration for the shared directories, listing behavior and
//! logging. See [`ConfigLoader`] for source precedence.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileteConfig {
    /// Absolute paths of the directories to share, in listing order
    #[serde(default)]
    pub shared_directories: Vec<PathBuf>,

    /// Listing and traversal settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listing and traversal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Depth used when a caller does not specify one
    #[serde(default = "default_depth")]
    pub default_depth: usize,

    /// Follow symbolic links in listings and archives (may reach outside a root)
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_depth() -> usize {
    crate::api::DEFAULT_LIST_DEPTH
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            follow_symlinks: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    SharedDirectory(String, String),
    Listing(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::SharedDirectory(path, msg) => {
                write!(f, "Shared directory '{}': {}", path, msg)
            }
            ValidationError::Listing(msg) => write!(f, "Listing: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FileteConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.shared_directories.is_empty() {
            errors.push(ValidationError::SharedDirectory(
                String::new(),
                "at least one shared directory is required".to_string(),
            ));
        }

        for dir in &self.shared_directories {
            if dir.as_os_str().is_empty() {
                errors.push(ValidationError::SharedDirectory(
                    String::new(),
                    "path cannot be empty".to_string(),
                ));
            } else if !dir.is_absolute() {
                errors.push(ValidationError::SharedDirectory(
                    dir.display().to_string(),
                    "path must be absolute".to_string(),
                ));
            }
        }

        if self.listing.default_depth < 1 {
            errors.push(ValidationError::Listing(format!(
                "default_depth must be >= 1, got {}",
                self.listing.default_depth
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
