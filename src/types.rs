//! Shared type aliases.

/// Identifier of a shared root: lowercase hex SHA-256 of the root's absolute path.
pub type RootId = String;

/// Raw SHA-256 digest.
pub type Hash = [u8; 32];
