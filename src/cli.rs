//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to the share API.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_fetch_summary, format_listing_json, format_listing_text, format_roots_json,
    format_roots_text, format_size,
};
pub use route::RunContext;
