//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ShareError};

/// Map domain/service errors to a string for CLI output.
///
/// Listing and retrieval errors carry their status class so scripts can tell
/// a bad request from a server-side failure.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Share(share) => {
            let class = if share.kind().is_client_error() {
                "request error"
            } else {
                "server error"
            };
            format!("{} ({}): {}", class, share.kind().status_code(), share)
        }
        other => other.to_string(),
    }
}

/// Process exit code for an error.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::Share(ShareError::Io { .. }) => 3,
        ApiError::Share(_) => 2,
        _ => 1,
    }
}
