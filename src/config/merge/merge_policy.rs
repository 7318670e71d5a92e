//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the global file, then workspace
//! files, then the environment. Arrays (`shared_directories`) are replaced, not
//! concatenated.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("listing.default_depth", 2)?
        .set_default("listing.follow_symlinks", false)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
