//! CLI presentation: text and json formatters per command family.

mod listing;
mod roots;

pub use listing::{format_fetch_summary, format_listing_json, format_listing_text, format_size};
pub use roots::{format_roots_json, format_roots_text};
