//! Path addressing: absolute filesystem paths <-> (root, relative path) pairs
//!
//! Relative paths are the wire-facing form. They always use `/` as the
//! separator, never start or end with a separator, and the root itself is the
//! empty string.

use crate::error::ShareError;
use crate::roots::Root;
use std::path::{Component, Path, PathBuf};

const SEPARATOR: char = '/';

/// Normalize a wire-facing relative path.
///
/// Drops empty and `.` segments, so leading, trailing, and doubled separators
/// disappear. `..` segments are kept; [`to_absolute`] rejects them.
pub fn normalize_relative(relative: &str) -> String {
    relative
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a relative path against a root.
///
/// The result is the root's absolute path joined with the normalized relative
/// path by exactly one separator; an empty relative path yields the root
/// itself. Fails with [`ShareError::PathEscapesRoot`] on `..` segments.
pub fn to_absolute(root: &Root, relative: &str) -> Result<PathBuf, ShareError> {
    let normalized = normalize_relative(relative);
    let mut absolute = root.absolute_path.clone();
    if normalized.is_empty() {
        return Ok(absolute);
    }
    for segment in normalized.split(SEPARATOR) {
        if segment == ".." {
            return Err(ShareError::PathEscapesRoot(relative.to_string()));
        }
        absolute.push(segment);
    }
    Ok(absolute)
}

/// Strip the root prefix from an absolute path.
///
/// The prefix is matched component-wise, so `/srv/shared` is not treated as
/// living under a root at `/srv/share`. A path outside the root is returned
/// unchanged; that is a caller error, not a recoverable condition.
pub fn to_relative(absolute: &Path, root: &Root) -> String {
    match absolute.strip_prefix(&root.absolute_path) {
        Ok(rest) => join_components(rest),
        Err(_) => absolute.to_string_lossy().into_owned(),
    }
}

/// Join the normal components of a path with `/`.
pub fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a configured root path: trailing separators are removed (except
/// for the filesystem root) so that `/srv/share/` and `/srv/share` address the
/// same root.
pub fn normalize_root_path(path: &Path) -> PathBuf {
    let mut path_str = path.to_string_lossy().to_string();
    while path_str.len() > 1 && (path_str.ends_with('/') || path_str.ends_with('\\')) {
        path_str.pop();
    }
    PathBuf::from(path_str)
}

/// Canonicalize a path given on the command line (resolves symlinks, `..`, `.`).
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, ShareError> {
    dunce::canonicalize(path).map_err(|e| ShareError::io(path.display().to_string(), e))
}

/// Fail with `NotFound` if any segment of `relative` below `root` is a symbolic link.
///
/// Used when symlinks are not followed: listings hide them, so addressing one
/// directly must not reach through it either.
pub fn reject_symlinks(root: &Root, relative: &str) -> Result<(), ShareError> {
    let normalized = normalize_relative(relative);
    if normalized.is_empty() {
        return Ok(());
    }
    let mut current = root.absolute_path.clone();
    for segment in normalized.split(SEPARATOR) {
        current.push(segment);
        let metadata = std::fs::symlink_metadata(&current)
            .map_err(|e| ShareError::io(normalized.clone(), e))?;
        if metadata.file_type().is_symlink() {
            return Err(ShareError::NotFound(normalized));
        }
    }
    Ok(())
}
