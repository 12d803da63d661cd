//! Error types for the upload widget.
//!
//! - [`UploadError`] - Everything a batch can end with, shown to the user
//! - [`StateError`] - Misuse of the widget model (wrong batch, wrong phase)

use thiserror::Error;

use crate::transfer::FileStatus;
use crate::widget::{BatchId, BatchPhase};

// =============================================================================
// Upload Errors
// =============================================================================

/// Message shown when nothing was selected.
pub const NO_FILES_MESSAGE: &str = "Please select files to upload";

/// Terminal outcome of a failed batch.
///
/// The `Display` text is exactly what the widget shows inline.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Nothing to upload. Raised locally, no request is sent.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with an error.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed.
    #[error("Upload failed: could not reach the server")]
    Network { detail: String },

    /// The backend answered 2xx with a body we cannot use.
    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

impl UploadError {
    /// Empty selection.
    pub fn no_files() -> Self {
        UploadError::Validation(NO_FILES_MESSAGE.to_string())
    }

    /// Network failure with a diagnostic detail.
    pub fn network(detail: impl Into<String>) -> Self {
        UploadError::Network { detail: detail.into() }
    }

    /// Short name of the error class, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::Validation(_) => "validation",
            UploadError::Http { .. } => "http",
            UploadError::Network { .. } => "network",
            UploadError::UnexpectedResponse(_) => "unexpected-response",
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Model Errors
// =============================================================================

/// Rejected widget state changes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    /// No such batch in the widget (never created or already cleared).
    #[error("Unknown {0}")]
    UnknownBatch(BatchId),

    /// The batch already left the `Idle` phase.
    #[error("{id} is already {phase}")]
    BatchNotIdle { id: BatchId, phase: BatchPhase },

    /// The batch is not waiting for a response.
    #[error("{id} is not submitting (currently {phase})")]
    BatchNotSubmitting { id: BatchId, phase: BatchPhase },

    /// File status would go backwards or skip a step.
    #[error("Cannot move file from {from} to {to}")]
    InvalidTransition { from: FileStatus, to: FileStatus },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for model operations.
pub type CoreResult<T> = Result<T, StateError>;
