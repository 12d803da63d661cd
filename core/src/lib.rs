//! # Gnome - upload widget core
//!
//! Everything the Gnome upload widget knows that does not depend on a
//! platform: the per-file and per-batch state machine, the HTTP contract of
//! the organizer backend, error taxonomy and text rendering.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   select_files   ┌──────────────┐   BatchEvent   ┌──────────────┐
//! │ picker / drop│─────────────────▶│ UploadWidget │◀───────────────│ submit_batch │
//! └──────────────┘                  └──────────────┘                └──────┬───────┘
//!                                          │ render                        │ send
//!                                          ▼                               ▼
//!                                   ┌──────────────┐               ┌───────────────┐
//!                                   │  text / view │               │UploadTransport│
//!                                   └──────────────┘               └───────────────┘
//! ```
//!
//! The browser shell (`gnome-frontend`) and the CLI (`gnome-client`) each
//! provide an [`UploadTransport`] and feed [`BatchEvent`]s back into an
//! [`UploadWidget`].
//!
//! ## Modules
//!
//! - [`config`] - Endpoint configuration
//! - [`error`] - Error taxonomy
//! - [`file`] - Selected file metadata
//! - [`transfer`] - Per-file transfer state
//! - [`response`] - Backend response model and interpretation
//! - [`widget`] - The widget model (batches, entries, notice)
//! - [`driver`] - Transport seam and batch submission
//! - [`render`] - Text rendering of results and progress

// Core modules
pub mod config;
pub mod error;

// Model
pub mod file;
pub mod transfer;
pub mod response;
pub mod widget;

// Network
pub mod driver;

// Presentation
pub mod render;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{UploadConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_UPLOAD_PATH, FILES_FIELD};

pub use error::{CoreResult, StateError, UploadError};

pub use file::{format_megabytes, FileCategory, SelectedFile};

pub use transfer::{percent, FileStatus, FileTransferState};

pub use response::{interpret_response, FolderStructure, UploadResult, UploadStats};

pub use widget::{Batch, BatchId, BatchPhase, FileEntry, Notice, UploadWidget};

pub use driver::{submit_batch, BatchEvent, FileHandle, RawResponse, UploadTransport};

pub use render::{notice_text, progress_label, stats_line, structure_lines, summary_lines};
