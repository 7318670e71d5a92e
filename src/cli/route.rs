//! CLI route: single route table and run context. Dispatches to the share API and presentation.

use crate::api::{Download, ShareApi};
use crate::config::{ConfigLoader, FileteConfig};
use crate::error::ApiError;
use crate::tree::path;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_fetch_summary, format_listing_json, format_listing_text, format_roots_json,
    format_roots_text,
};

/// Runtime context for CLI execution: the share API built from configuration.
pub struct RunContext {
    api: ShareApi,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    ///
    /// Non-empty `shares` replace the configured shared directories; they are
    /// canonicalized so relative command-line paths become absolute roots.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        shares: &[PathBuf],
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        if !shares.is_empty() {
            config.shared_directories = shares
                .iter()
                .map(|share| path::canonicalize_path(share))
                .collect::<Result<_, _>>()?;
        }

        Self::from_config(&config)
    }

    /// Validate configuration and build the share API from it.
    pub fn from_config(config: &FileteConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Self {
            api: ShareApi::from_config(config),
            color: io::stdout().is_terminal(),
        })
    }

    /// Reference to the underlying share API.
    pub fn api(&self) -> &ShareApi {
        &self.api
    }

    /// Force colored text output on or off.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis(),
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Roots { format } => {
                if *format == "json" {
                    format_roots_json(self.api.registry())
                } else {
                    Ok(format_roots_text(self.api.registry()))
                }
            }
            Commands::List {
                path,
                root,
                depth,
                format,
            } => {
                let root_id = if path.is_empty() {
                    String::new()
                } else {
                    self.root_id(root.as_deref())
                };
                let depth = depth.unwrap_or_else(|| self.api.default_depth());
                let listing = self.api.list(path, &root_id, depth)?;
                if *format == "json" {
                    format_listing_json(&listing)
                } else {
                    Ok(format_listing_text(&listing, self.color))
                }
            }
            Commands::Fetch { path, root, output } => {
                let root_id = self.root_id(root.as_deref());
                let download = self.api.fetch(path, &root_id)?;
                let destination = output
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&download.file_name));
                let file_name = download.file_name.clone();
                let is_archive = download.is_archive;
                let written = write_download(download, &destination)?;
                Ok(format_fetch_summary(&file_name, &destination, written, is_archive))
            }
        }
    }

    /// Explicit root id, or the only configured root when none is given.
    fn root_id(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(id) => id.to_string(),
            None => {
                let mut roots = self.api.registry().roots();
                match (roots.next(), roots.next()) {
                    (Some(only), None) => {
                        debug!(root_id = %only.id, "Defaulting to the only shared root");
                        only.id.clone()
                    }
                    // Resolves to InvalidRoot with an empty id
                    _ => String::new(),
                }
            }
        }
    }
}

/// Copy a download to `destination`, returning the number of bytes written.
fn write_download(mut download: Download, destination: &Path) -> Result<u64, ApiError> {
    let output_error =
        |e: io::Error| ApiError::OutputError(format!("{}: {}", destination.display(), e));

    let file = File::create(destination).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    let written = io::copy(&mut download, &mut writer).map_err(output_error)?;
    writer.flush().map_err(output_error)?;
    Ok(written)
}

/// Command name for logging.
fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Roots { .. } => "roots",
        Commands::List { .. } => "list",
        Commands::Fetch { .. } => "fetch",
    }
}
