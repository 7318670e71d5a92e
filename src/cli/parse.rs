//! CLI parse: clap types for filete. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// filete CLI - browse and download shared directory trees
#[derive(Parser)]
#[command(name = "filete")]
#[command(about = "List and download the contents of shared directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to share; repeat to share several. Replaces configured directories.
    #[arg(long = "share", value_name = "DIR")]
    pub shares: Vec<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the shared roots and their ids
    Roots {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List a directory, or every root when PATH is omitted
    List {
        /// Path relative to the root ('/'-separated)
        #[arg(default_value = "")]
        path: String,
        /// Root id (may be omitted when only one directory is shared)
        #[arg(long)]
        root: Option<String>,
        /// Levels to expand (default: listing.default_depth)
        #[arg(long)]
        depth: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Download a file, or a directory as a zip archive
    Fetch {
        /// Path relative to the root; empty for the whole root
        path: String,
        /// Root id (may be omitted when only one directory is shared)
        #[arg(long)]
        root: Option<String>,
        /// Destination file (default: suggested name in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
