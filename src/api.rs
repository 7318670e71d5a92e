//! Retrieval API
//!
//! The only surface callers (HTTP handlers, the CLI) use: `list` for
//! depth-bounded listings and `fetch` for downloads. Stateless per call; the
//! registry is immutable, so a single `ShareApi` can be shared across threads.

use crate::archive::ArchivePackager;
use crate::config::FileteConfig;
use crate::error::ShareError;
use crate::roots::{Root, RootRegistry};
use crate::tree::builder::{self, TreeBuilder};
use crate::tree::entry::Entry;
use crate::tree::path;
use crate::tree::walker::WalkerConfig;
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Depth used when the caller does not pick one.
pub const DEFAULT_LIST_DEPTH: usize = 2;

/// Result of a listing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    /// Top-level listing: one entry per configured root, in configuration order
    Roots(Vec<Entry>),
    /// Listing of one directory below a root
    Directory(Entry),
}

/// A byte stream ready to be sent to the client.
pub struct Download {
    pub stream: Box<dyn Read + Send>,
    /// Suggested file name (`<dir>.zip` for archives)
    pub file_name: String,
    /// True when `stream` is a zip archive of a directory
    pub is_archive: bool,
    /// Total number of bytes `stream` yields
    pub length: u64,
}

impl Download {
    pub fn content_type(&self) -> &'static str {
        if self.is_archive {
            "application/zip"
        } else {
            "application/octet-stream"
        }
    }

    /// Value for a `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        let escaped = self.file_name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("attachment; filename=\"{}\"", escaped)
    }
}

impl Read for Download {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl fmt::Debug for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Download")
            .field("file_name", &self.file_name)
            .field("is_archive", &self.is_archive)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Listing and retrieval over a fixed set of shared roots
pub struct ShareApi {
    registry: RootRegistry,
    walker_config: WalkerConfig,
    default_depth: usize,
}

impl ShareApi {
    pub fn new(registry: RootRegistry) -> Self {
        Self {
            registry,
            walker_config: WalkerConfig::default(),
            default_depth: DEFAULT_LIST_DEPTH,
        }
    }

    /// Build the API from loaded configuration.
    pub fn from_config(config: &FileteConfig) -> Self {
        Self::new(RootRegistry::register(&config.shared_directories))
            .with_walker_config(WalkerConfig {
                follow_symlinks: config.listing.follow_symlinks,
            })
            .with_default_depth(config.listing.default_depth)
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    pub fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    pub fn default_depth(&self) -> usize {
        self.default_depth
    }

    /// List a directory, or every root when `relative_path` is empty.
    ///
    /// With an empty path `root_id` is ignored and each root is listed at its
    /// top level; a failure on any root fails the whole call.
    #[instrument(skip(self))]
    pub fn list(&self, relative_path: &str, root_id: &str, depth: usize) -> Result<Listing, ShareError> {
        if depth < 1 {
            return Err(ShareError::InvalidDepth(depth));
        }

        if relative_path.is_empty() {
            debug!(root_count = self.registry.len(), "Listing all roots");
            let roots = builder::build_roots(&self.registry, &self.walker_config, depth)?;
            return Ok(Listing::Roots(roots));
        }

        let (root, absolute) = self.locate(relative_path, root_id)?;
        let entry = TreeBuilder::new(root)
            .with_walker_config(self.walker_config.clone())
            .build(&absolute, depth)?;
        Ok(Listing::Directory(entry))
    }

    /// Open a file for download, or package a directory as a zip archive.
    ///
    /// Archives are written to an anonymous temporary file, which the OS
    /// reclaims once the returned stream (or, on failure, the packager) drops it.
    #[instrument(skip(self))]
    pub fn fetch(&self, relative_path: &str, root_id: &str) -> Result<Download, ShareError> {
        let (root, absolute) = self.locate(relative_path, root_id)?;
        let relative = path::to_relative(&absolute, root);

        let metadata = fs::metadata(&absolute).map_err(|e| ShareError::io(relative.clone(), e))?;
        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.name());

        if metadata.is_dir() {
            let temp = tempfile::tempfile().map_err(|e| ShareError::io_failure(relative.clone(), e))?;
            let (mut archive, stats) = ArchivePackager::new()
                .with_walker_config(self.walker_config.clone())
                .pack(&absolute, temp)?;
            let length = archive
                .seek(SeekFrom::End(0))
                .and_then(|len| archive.rewind().map(|_| len))
                .map_err(|e| ShareError::io_failure(relative.clone(), e))?;

            info!(path = %relative, files = stats.files, length, "Serving directory archive");
            Ok(Download {
                stream: Box::new(archive),
                file_name: format!("{}.zip", name),
                is_archive: true,
                length,
            })
        } else if metadata.is_file() {
            let file = File::open(&absolute).map_err(|e| ShareError::io(relative.clone(), e))?;

            info!(path = %relative, length = metadata.len(), "Serving file");
            Ok(Download {
                stream: Box::new(file),
                file_name: name,
                is_archive: false,
                length: metadata.len(),
            })
        } else {
            Err(ShareError::NotFound(relative))
        }
    }

    /// Resolve root id and relative path to an absolute path inside the root.
    fn locate(&self, relative_path: &str, root_id: &str) -> Result<(&Root, PathBuf), ShareError> {
        let root = self.registry.resolve(root_id)?;
        let absolute = path::to_absolute(root, relative_path)?;
        if !self.walker_config.follow_symlinks {
            path::reject_symlinks(root, relative_path)?;
        }
        Ok((root, absolute))
    }
}
