//! Full-depth filesystem walker used for archive packaging

use crate::error::ShareError;
use crate::tree::entry::EntryKind;
use std::path::PathBuf;
use std::time::SystemTime;
use walkdir::WalkDir;

/// A filesystem entry found by the walker, with the metadata archives need.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Unix permission bits, when the platform has them
    pub mode: Option<u32>,
}

/// Traversal settings shared by listings and archives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false; unfollowed links are skipped)
    pub follow_symlinks: bool,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the whole subtree, root included, with no depth limit.
    ///
    /// Returns entries sorted by path, so every directory precedes its contents.
    /// The first error aborts the walk.
    pub fn walk(&self) -> Result<Vec<WalkEntry>, ShareError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root).follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| self.root.display().to_string());
                ShareError::io_failure(path, e.into())
            })?;

            // Unfollowed symlinks are invisible, but a symlinked root is still walked.
            if entry.depth() > 0 && entry.path_is_symlink() && !self.config.follow_symlinks {
                continue;
            }

            let path = entry.path().to_path_buf();
            let metadata = entry
                .metadata()
                .map_err(|e| ShareError::io_failure(path.display().to_string(), e.into()))?;

            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else if metadata.is_file() {
                EntryKind::File
            } else {
                // Sockets, fifos, devices
                continue;
            };

            entries.push(WalkEntry {
                size: if kind == EntryKind::File { metadata.len() } else { 0 },
                modified: metadata.modified().ok(),
                mode: unix_mode(&metadata),
                kind,
                path,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(entries)
    }
}

#[cfg(unix)]
fn unix_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}
