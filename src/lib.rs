//! filete: Shared Directory Listing and Retrieval
//!
//! Exposes a fixed set of server-side directories: stable root ids,
//! depth-bounded listings with a deterministic sibling order, and downloads of
//! single files or whole directories as zip archives.

pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod roots;
pub mod tree;
pub mod types;

pub use api::{Download, Listing, ShareApi};
pub use error::{ApiError, ErrorKind, ShareError};
pub use roots::{Root, RootRegistry};
pub use tree::entry::{Entry, EntryKind};
