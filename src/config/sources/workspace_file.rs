//! Per-workspace TOML files under `<workspace>/config/`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};

const ENV_VAR: &str = "FILETE_ENV";
const DEFAULT_ENV: &str = "development";

/// Active environment name; unset or blank falls back to `development`.
pub fn env_name() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Existing workspace files, lowest precedence first: the shared
/// `config.toml`, then the overlay for `env`.
pub fn existing_files(workspace_root: &Path, env: &str) -> Vec<PathBuf> {
    let dir = workspace_root.join("config");
    [dir.join("config.toml"), dir.join(format!("{}.toml", env))]
        .into_iter()
        .filter(|candidate| candidate.is_file())
        .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = existing_files(workspace_root, &env_name())
        .into_iter()
        .fold(builder, |builder, file| {
            builder.add_source(
                File::from(file.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
        });
    Ok(builder)
}
