//! Config loader: assembles the layered sources into a [`FileteConfig`].

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::FileteConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from files and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Sources (later wins): defaults, global file, `config/config.toml`,
    /// `config/{FILETE_ENV}.toml`, `FILETE_*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<FileteConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: FileteConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            shared_directories = config.shared_directories.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load a single TOML file over the defaults. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<FileteConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Path of the global configuration file, if one can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
