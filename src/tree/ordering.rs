//! Sibling ordering for listed entries

use crate::tree::entry::{Entry, EntryKind};
use std::cmp::Ordering;

/// Compare two sibling entries.
///
/// Directories come before files. Within the same kind, names starting with
/// `.` come before names that don't. Ties are broken by byte-wise name order.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    kind_rank(a.kind())
        .cmp(&kind_rank(b.kind()))
        .then_with(|| b.is_dotfile().cmp(&a.is_dotfile()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Sort a sibling list in place.
pub fn sort_siblings(entries: &mut [Entry]) {
    entries.sort_by(compare_entries);
}

fn kind_rank(kind: EntryKind) -> u8 {
    match kind {
        EntryKind::Directory => 0,
        EntryKind::File => 1,
    }
}
