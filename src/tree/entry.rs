//! Listed tree nodes

use crate::types::RootId;
use serde::{Deserialize, Serialize};

/// Type of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A node in a listed directory tree.
///
/// `relative_path` is always relative to the owning root and uses `/` as the
/// separator; the root directory itself has an empty relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    #[serde(rename_all = "camelCase")]
    File {
        name: String,
        #[serde(rename = "path")]
        relative_path: String,
        size: u64,
        root_id: RootId,
    },
    /// `children` is `None` when the depth budget ran out at this directory: a
    /// further listing at `relative_path` is needed to expand it. `size` is the
    /// sum of the listed children only, and 0 for a truncated directory.
    #[serde(rename_all = "camelCase")]
    Directory {
        name: String,
        #[serde(rename = "path")]
        relative_path: String,
        size: u64,
        root_id: RootId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Vec<Entry>>,
    },
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File { .. } => EntryKind::File,
            Entry::Directory { .. } => EntryKind::Directory,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Directory { name, .. } => name,
        }
    }

    pub fn relative_path(&self) -> &str {
        match self {
            Entry::File { relative_path, .. } | Entry::Directory { relative_path, .. } => {
                relative_path
            }
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Entry::File { size, .. } | Entry::Directory { size, .. } => *size,
        }
    }

    pub fn root_id(&self) -> &str {
        match self {
            Entry::File { root_id, .. } | Entry::Directory { root_id, .. } => root_id,
        }
    }

    /// Listed children; `None` for files and for truncated directories.
    pub fn children(&self) -> Option<&[Entry]> {
        match self {
            Entry::Directory {
                children: Some(children),
                ..
            } => Some(children.as_slice()),
            _ => None,
        }
    }

    /// True for a directory whose children were not listed.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Entry::Directory { children: None, .. })
    }

    /// Whether the name marks a hidden entry (leading `.`).
    pub fn is_dotfile(&self) -> bool {
        self.name().starts_with('.')
    }
}
