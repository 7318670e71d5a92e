//! Shared Directory Trees
//!
//! Depth-bounded listings of shared roots: entries, sibling ordering, path
//! addressing, root identifiers, and the full-depth walker used for archives.

pub mod builder;
pub mod entry;
pub mod hasher;
pub mod ordering;
pub mod path;
pub mod walker;
