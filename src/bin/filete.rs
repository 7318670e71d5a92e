//! filete CLI Binary
//!
//! Command-line interface for listing and downloading shared directories.

use clap::Parser;
use filete::cli::{Cli, RunContext};
use filete::config::ConfigLoader;
use filete::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("filete starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone(), &cli.shares) {
        Ok(ctx) => {
            info!(roots = ctx.api().registry().len(), "CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error initializing shares: {}", e);
            eprintln!("{}", filete::cli::map_error(&e));
            process::exit(filete::cli::exit_code(&e));
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", filete::cli::map_error(&e));
            process::exit(filete::cli::exit_code(&e));
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // Without --verbose only explicit log flags or FILETE_LOG turn logging on
    let explicit = cli.log_level.is_some() || std::env::var_os("FILETE_LOG").is_some();
    if !cli.verbose && !explicit {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    let loaded = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(&cli.workspace),
    };
    let mut config = loaded.map(|c| c.logging).unwrap_or_default();

    if cli.verbose && cli.log_level.is_none() {
        config.level = "debug".to_string();
    }

    // CLI arguments win over the config file
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
