//! Error types for the command-line uploader.
//!
//! - [`ClientError`] - Local file problems, HTTP client setup, upload outcome
//!
//! Upload failures stay [`UploadError`]s so the text printed is the same
//! the browser widget shows.

use std::path::PathBuf;
use thiserror::Error;

use gnome::UploadError;

/// Errors from the CLI and its transport.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A selected path could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A selected path is a directory or other non-file.
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The batch failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClientError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for CLI operations.
pub type ClientResult<T> = Result<T, ClientError>;
