//! Tree builder for depth-bounded directory listings

use crate::error::ShareError;
use crate::roots::{Root, RootRegistry};
use crate::tree::entry::Entry;
use crate::tree::ordering;
use crate::tree::path;
use crate::tree::walker::WalkerConfig;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, instrument, trace};

/// Tree builder for listing one directory of a shared root
pub struct TreeBuilder<'a> {
    root: &'a Root,
    walker_config: WalkerConfig,
}

impl<'a> TreeBuilder<'a> {
    /// Create a new tree builder for the given root
    pub fn new(root: &'a Root) -> Self {
        Self {
            root,
            walker_config: WalkerConfig::default(),
        }
    }

    /// Set walker config (symlink policy).
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Build the listing for `absolute_path`, expanding `depth` levels.
    ///
    /// A directory at the depth boundary is emitted with `children: None`; the
    /// caller expands it with another `build` at that directory's path. Siblings
    /// are ordered at every level, and any error below aborts the whole build.
    #[instrument(skip(self), fields(root_id = %self.root.id, path = %absolute_path.display()))]
    pub fn build(&self, absolute_path: &Path, depth: usize) -> Result<Entry, ShareError> {
        if depth < 1 {
            return Err(ShareError::InvalidDepth(depth));
        }

        let start = Instant::now();
        let relative = path::to_relative(absolute_path, self.root);

        let metadata =
            fs::metadata(absolute_path).map_err(|e| ShareError::io(relative.clone(), e))?;
        if !metadata.is_dir() {
            return Err(ShareError::NotADirectory(relative));
        }

        let entry = match self.build_directory(absolute_path, depth) {
            Ok(entry) => entry,
            Err(e) => {
                error!("Listing failed: {}", e);
                return Err(e);
            }
        };

        debug!(
            children = entry.children().map(|c| c.len()).unwrap_or(0),
            size = entry.size(),
            duration_ms = start.elapsed().as_millis(),
            "Listing built"
        );

        Ok(entry)
    }

    /// List a directory known to exist, recursing while depth remains.
    fn build_directory(&self, dir_path: &Path, depth: usize) -> Result<Entry, ShareError> {
        let relative = path::to_relative(dir_path, self.root);
        trace!(path = %relative, depth, "Reading directory");

        let dir_entries =
            fs::read_dir(dir_path).map_err(|e| ShareError::io(relative.clone(), e))?;

        let mut children = Vec::new();

        for dir_entry in dir_entries {
            let dir_entry = dir_entry.map_err(|e| ShareError::io_failure(relative.clone(), e))?;
            let child_path = dir_entry.path();
            let child_relative = path::to_relative(&child_path, self.root);

            let file_type = dir_entry
                .file_type()
                .map_err(|e| ShareError::io_failure(child_relative.clone(), e))?;

            let metadata = if file_type.is_symlink() {
                if !self.walker_config.follow_symlinks {
                    trace!(path = %child_relative, "Skipping symlink");
                    continue;
                }
                match fs::metadata(&child_path) {
                    Ok(m) => m,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        debug!(path = %child_relative, "Skipping dangling symlink");
                        continue;
                    }
                    Err(e) => return Err(ShareError::io_failure(child_relative, e)),
                }
            } else {
                dir_entry
                    .metadata()
                    .map_err(|e| ShareError::io_failure(child_relative.clone(), e))?
            };

            trace!(path = %child_relative, is_dir = metadata.is_dir(), "Found entry");

            if metadata.is_dir() {
                if depth > 1 {
                    children.push(self.build_directory(&child_path, depth - 1)?);
                } else {
                    children.push(Entry::Directory {
                        name: entry_name(&child_path),
                        relative_path: child_relative,
                        size: 0,
                        root_id: self.root.id.clone(),
                        children: None,
                    });
                }
            } else if metadata.is_file() {
                children.push(Entry::File {
                    name: entry_name(&child_path),
                    relative_path: child_relative,
                    size: metadata.len(),
                    root_id: self.root.id.clone(),
                });
            }
            // Sockets, fifos and devices are not listed
        }

        ordering::sort_siblings(&mut children);
        let size = children.iter().map(Entry::size).sum();

        Ok(Entry::Directory {
            name: entry_name(dir_path),
            relative_path: relative,
            size,
            root_id: self.root.id.clone(),
            children: Some(children),
        })
    }
}

/// Build every root at its top level with the given depth.
///
/// A failure on any root fails the whole listing; no partial list is returned.
pub fn build_roots(
    registry: &RootRegistry,
    walker_config: &WalkerConfig,
    depth: usize,
) -> Result<Vec<Entry>, ShareError> {
    if depth < 1 {
        return Err(ShareError::InvalidDepth(depth));
    }
    registry
        .roots()
        .map(|root| {
            TreeBuilder::new(root)
                .with_walker_config(walker_config.clone())
                .build(&root.absolute_path, depth)
        })
        .collect()
}

/// Final path component, or the whole path for a filesystem root.
fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
