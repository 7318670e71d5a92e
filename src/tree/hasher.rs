//! Root identifier computation using SHA-256

use crate::types::{Hash, RootId};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute the RootId for a shared root
///
/// RootId = lowercase_hex(sha256(path bytes))
///
/// No salt and no version prefix: the same configured path always produces
/// the same id, across calls and across process restarts.
pub fn compute_root_id(root_path: &Path) -> RootId {
    hex::encode(compute_hash(root_path.as_os_str().as_encoded_bytes()))
}

/// Compute a generic SHA-256 hash of arbitrary data
pub fn compute_hash(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
