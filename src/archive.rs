//! Archive packaging for directory downloads.
//!
//! A directory is serialized, at full depth, into a single zip stream. Entry
//! names are relative to the directory's parent, so the directory's own name
//! is the one top-level component of the archive. Files are deflated;
//! directories contribute a header ending in `/` and no content.

use crate::error::ShareError;
use crate::tree::entry::EntryKind;
use crate::tree::path;
use crate::tree::walker::{WalkEntry, Walker, WalkerConfig};
use chrono::{Datelike, Timelike};
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;
use std::time::{Instant, SystemTime};
use tracing::{debug, info, instrument, trace};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Files at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Summary of a finished archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackStats {
    pub files: usize,
    pub directories: usize,
    /// Uncompressed bytes copied from files
    pub bytes: u64,
}

/// Packs directory subtrees into zip archives
#[derive(Debug, Clone, Default)]
pub struct ArchivePackager {
    walker_config: WalkerConfig,
}

impl ArchivePackager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set walker config (symlink policy).
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Write the archive of `source` into `sink` and hand the sink back.
    ///
    /// The archive is only valid when this returns `Ok`. The first failure
    /// aborts and is propagated. On that path the sink is dropped, and the zip
    /// writer still appends a central directory to it while unwinding, so a
    /// borrowed sink such as `&mut File` can end up holding a well-formed but
    /// partial archive. Pass an owned, disposable sink (an anonymous temp
    /// file) or truncate a borrowed one after an error.
    #[instrument(skip(self, sink), fields(path = %source.display()))]
    pub fn pack<W: Write + Seek>(&self, source: &Path, sink: W) -> Result<(W, PackStats), ShareError> {
        let start = Instant::now();
        let base = source.parent().unwrap_or(source);
        let source_name = archive_name(source, base);

        let metadata = fs::metadata(source).map_err(|e| ShareError::io(source_name.clone(), e))?;
        if !metadata.is_dir() {
            return Err(ShareError::NotADirectory(source_name));
        }

        let entries = Walker::with_config(source.to_path_buf(), self.walker_config.clone()).walk()?;
        debug!(entry_count = entries.len(), "Walked archive source");

        let mut zip = ZipWriter::new(sink);
        let mut stats = PackStats {
            files: 0,
            directories: 0,
            bytes: 0,
        };

        for entry in &entries {
            let name = archive_name(&entry.path, base);
            // Only the filesystem root itself has no name relative to its parent
            if name.is_empty() {
                continue;
            }
            let options = entry_options(entry);

            match entry.kind {
                EntryKind::Directory => {
                    zip.add_directory(format!("{}/", name), options)
                        .map_err(|e| ShareError::io_failure(name.clone(), e.into()))?;
                    stats.directories += 1;
                }
                EntryKind::File => {
                    zip.start_file(name.clone(), options)
                        .map_err(|e| ShareError::io_failure(name.clone(), e.into()))?;
                    let mut file = File::open(&entry.path)
                        .map_err(|e| ShareError::io_failure(name.clone(), e))?;
                    let copied = io::copy(&mut file, &mut zip)
                        .map_err(|e| ShareError::io_failure(name.clone(), e))?;
                    trace!(entry = %name, bytes = copied, "Archived file");
                    stats.files += 1;
                    stats.bytes += copied;
                }
            }
        }

        let sink = zip
            .finish()
            .map_err(|e| ShareError::io_failure(source_name.clone(), e.into()))?;

        info!(
            files = stats.files,
            directories = stats.directories,
            bytes = stats.bytes,
            duration_ms = start.elapsed().as_millis(),
            "Archive packed"
        );

        Ok((sink, stats))
    }
}

/// Archive entry name: the path relative to `base`, `/`-separated.
fn archive_name(path: &Path, base: &Path) -> String {
    path::join_components(path.strip_prefix(base).unwrap_or(path))
}

fn entry_options(entry: &WalkEntry) -> FileOptions {
    let mut options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(entry.size >= ZIP64_THRESHOLD);
    if let Some(mode) = entry.mode {
        options = options.unix_permissions(mode);
    }
    if let Some(modified) = entry.modified.and_then(zip_timestamp) {
        options = options.last_modified_time(modified);
    }
    options
}

/// Convert to an MS-DOS timestamp (local time); `None` outside 1980..=2107.
fn zip_timestamp(time: SystemTime) -> Option<zip::DateTime> {
    let local: chrono::DateTime<chrono::Local> = time.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}
