//! Listing presentation: indented tree (text) or entry JSON.

use crate::api::Listing;
use crate::error::ApiError;
use crate::tree::entry::Entry;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_listing_json(listing: &Listing) -> Result<String, ApiError> {
    serde_json::to_string_pretty(listing).map_err(|e| ApiError::OutputError(e.to_string()))
}

/// Render a listing as an indented tree.
///
/// Directories end in `/`; directories cut off by the depth limit end in `/…`
/// and carry no size. A roots listing adds each root's id to its header line.
pub fn format_listing_text(listing: &Listing, color: bool) -> String {
    let mut lines = Vec::new();
    match listing {
        Listing::Roots(roots) => {
            if roots.is_empty() {
                return "No shared directories configured.".to_string();
            }
            for root in roots {
                let header = entry_label(root, color);
                lines.push(format!("{}  [{}]", header, root.root_id()));
                for child in root.children().unwrap_or_default() {
                    write_entry(&mut lines, child, 1, color);
                }
            }
        }
        Listing::Directory(entry) => write_entry(&mut lines, entry, 0, color),
    }
    lines.join("\n")
}

fn write_entry(lines: &mut Vec<String>, entry: &Entry, level: usize, color: bool) {
    lines.push(format!("{}{}", "  ".repeat(level), entry_label(entry, color)));
    for child in entry.children().unwrap_or_default() {
        write_entry(lines, child, level + 1, color);
    }
}

fn entry_label(entry: &Entry, color: bool) -> String {
    match entry {
        Entry::File { name, size, .. } => format!("{}  {}", name, format_size(*size)),
        Entry::Directory { name, .. } => {
            let dir_name = if color {
                format!("{}", name.blue().bold())
            } else {
                name.clone()
            };
            if entry.is_truncated() {
                format!("{}/…", dir_name)
            } else {
                format!("{}/  {}", dir_name, format_size(entry.size()))
            }
        }
    }
}

/// Human-readable byte count (binary units).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// One-line report for a completed download.
pub fn format_fetch_summary(file_name: &str, destination: &Path, bytes: u64, is_archive: bool) -> String {
    let what = if is_archive { "archive" } else { "file" };
    format!(
        "Wrote {} {} ({}) to {}",
        what,
        file_name,
        format_size(bytes),
        destination.display()
    )
}
