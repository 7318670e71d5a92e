//! Error types for shared-directory listing and retrieval.

use thiserror::Error;

/// Errors produced while listing or retrieving shared content.
///
/// Every variant is terminal for the request that produced it; nothing is
/// retried internally and no partial result accompanies an error.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Invalid root id: {0}")]
    InvalidRoot(String),

    #[error("Depth must be >= 1, got {0}")]
    InvalidDepth(usize),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Path escapes its shared root: {0}")]
    PathEscapesRoot(String),

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`ShareError`], for callers that map errors to
/// transport-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRoot,
    InvalidDepth,
    NotFound,
    NotADirectory,
    PathEscapesRoot,
    IoFailure,
}

impl ErrorKind {
    /// HTTP status code for this kind: client errors map to 4xx, I/O failures to 500.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidRoot | ErrorKind::NotFound => 404,
            ErrorKind::InvalidDepth | ErrorKind::NotADirectory | ErrorKind::PathEscapesRoot => 400,
            ErrorKind::IoFailure => 500,
        }
    }

    pub fn is_client_error(self) -> bool {
        self != ErrorKind::IoFailure
    }
}

impl ShareError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShareError::InvalidRoot(_) => ErrorKind::InvalidRoot,
            ShareError::InvalidDepth(_) => ErrorKind::InvalidDepth,
            ShareError::NotFound(_) => ErrorKind::NotFound,
            ShareError::NotADirectory(_) => ErrorKind::NotADirectory,
            ShareError::PathEscapesRoot(_) => ErrorKind::PathEscapesRoot,
            ShareError::Io { .. } => ErrorKind::IoFailure,
        }
    }

    /// Wrap an I/O error raised while touching `path`.
    ///
    /// A path that does not exist is a client error: `NotFound` I/O errors, and
    /// `NotADirectory` ones raised when a segment in the middle of the path is
    /// a regular file (`todo.txt/x`), both become [`ShareError::NotFound`].
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
                ShareError::NotFound(path)
            }
            _ => ShareError::Io { path, source },
        }
    }

    /// Wrap an I/O error that must stay an I/O failure even if its kind is `NotFound`
    /// (e.g. a file disappearing in the middle of an archive walk).
    pub fn io_failure(path: impl Into<String>, source: std::io::Error) -> Self {
        ShareError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Application-level errors (configuration, logging, CLI) wrapping core errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
