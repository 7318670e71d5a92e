//! Root registry: the immutable set of shared directories.
//!
//! Built once at startup from configuration. Adding a root requires building a
//! new registry (in practice, a restart). Read-only after construction, so it is
//! shared across requests without locking.

use crate::error::ShareError;
use crate::tree::{hasher, path};
use crate::types::RootId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A configured shared directory and its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub id: RootId,
    pub absolute_path: PathBuf,
}

impl Root {
    /// Create a root; the id is derived from the normalized path.
    pub fn new(absolute_path: PathBuf) -> Self {
        let absolute_path = path::normalize_root_path(&absolute_path);
        let id = hasher::compute_root_id(&absolute_path);
        Self { id, absolute_path }
    }

    /// Display name of the root directory (its final path component).
    pub fn name(&self) -> String {
        self.absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.absolute_path.to_string_lossy().into_owned())
    }
}

/// Registry of shared roots, addressed by [`RootId`].
#[derive(Debug, Clone, Default)]
pub struct RootRegistry {
    roots: Vec<Root>,
    index: HashMap<RootId, usize>,
}

impl RootRegistry {
    /// Build the registry from configured paths.
    ///
    /// Paths that normalize to the same root collapse into one entry;
    /// configuration order is kept for top-level listings.
    pub fn register<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut roots = Vec::new();
        let mut index = HashMap::new();
        for configured in paths {
            let root = Root::new(configured.as_ref().to_path_buf());
            if index.contains_key(&root.id) {
                debug!(path = %root.absolute_path.display(), "Duplicate shared root ignored");
                continue;
            }
            debug!(root_id = %root.id, path = %root.absolute_path.display(), "Registered shared root");
            index.insert(root.id.clone(), roots.len());
            roots.push(root);
        }
        Self { roots, index }
    }

    /// Look up a root by id.
    pub fn resolve(&self, id: &str) -> Result<&Root, ShareError> {
        self.index
            .get(id)
            .map(|&i| &self.roots[i])
            .ok_or_else(|| ShareError::InvalidRoot(id.to_string()))
    }

    /// All roots, in configuration order.
    pub fn roots(&self) -> impl Iterator<Item = &Root> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
