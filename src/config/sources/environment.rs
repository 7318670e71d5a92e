//! Environment source: FILETE_* variables, `__` between nested keys.
//!
//! `FILETE_SHARED_DIRECTORIES=/srv/a,/srv/b` sets the shared directory list;
//! `FILETE_LISTING__DEFAULT_DEPTH=3` sets `listing.default_depth`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const PREFIX: &str = "FILETE";

/// Add the environment source; it overrides every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("shared_directories")
            .try_parsing(true),
    )
}
