//! The upload widget model.
//!
//! Holds every file the user has handed over, grouped in batches, and the
//! single inline notice. Platform shells keep one [`UploadWidget`] in their
//! state and feed it selections and [`BatchEvent`]s.
//!
//! # Batch phases
//!
//! ```text
//! Idle ──begin──▶ Submitting ──complete(Ok)──▶ Succeeded
//!                          └───complete(Err)─▶ Failed
//! ```

use std::fmt;

use crate::driver::BatchEvent;
use crate::error::{CoreResult, StateError, UploadError};
use crate::file::SelectedFile;
use crate::response::UploadResult;
use crate::transfer::{percent, FileTransferState};

/// Message shown while a batch is on its way.
pub const UPLOADING_MESSAGE: &str = "Uploading files...";

/// Identifies one batch within a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(u64);

impl BatchId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "batch #{}", self.0)
    }
}

/// Lifecycle of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatchPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl BatchPhase {
    pub fn is_settled(self) -> bool {
        matches!(self, BatchPhase::Succeeded | BatchPhase::Failed)
    }
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchPhase::Idle => "idle",
            BatchPhase::Submitting => "submitting",
            BatchPhase::Succeeded => "succeeded",
            BatchPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Files sent together in one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch {
    pub id: BatchId,
    pub phase: BatchPhase,
    /// Set once the batch settles
    pub outcome: Option<Result<UploadResult, UploadError>>,
}

/// One row of the file list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    /// Batch the file was submitted with
    pub batch: BatchId,
    /// Position within the batch (and in the multipart body)
    pub slot: usize,
    pub file: SelectedFile,
    pub transfer: FileTransferState,
}

impl FileEntry {
    /// Stable key for list rendering.
    pub fn key(&self) -> (BatchId, usize) {
        (self.batch, self.slot)
    }
}

/// The inline message area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(UploadResult),
    Error(UploadError),
}

impl Notice {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Notice::Info(_) => "info",
            Notice::Success(_) => "success",
            Notice::Error(_) => "error",
        }
    }
}

/// Selection, per-file progress and outcome of every batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadWidget {
    entries: Vec<FileEntry>,
    batches: Vec<Batch>,
    notice: Option<Notice>,
    dragging: bool,
    next_batch: u64,
}

impl UploadWidget {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Accept a picker or drop selection as a new batch.
    ///
    /// An empty selection only sets the validation notice.
    pub fn select_files(&mut self, files: Vec<SelectedFile>) -> Result<BatchId, UploadError> {
        if files.is_empty() {
            let err = UploadError::no_files();
            self.notice = Some(Notice::Error(err.clone()));
            return Err(err);
        }

        self.next_batch += 1;
        let id = BatchId(self.next_batch);

        self.entries.extend(files.into_iter().enumerate().map(|(slot, file)| FileEntry {
            batch: id,
            slot,
            file,
            transfer: FileTransferState::new(),
        }));
        self.batches.push(Batch {
            id,
            phase: BatchPhase::Idle,
            outcome: None,
        });
        self.notice = Some(Notice::Info(UPLOADING_MESSAGE.to_string()));

        Ok(id)
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Mark the batch as submitting. Fails if it ever left `Idle`.
    pub fn begin(&mut self, id: BatchId) -> CoreResult<()> {
        let batch = self.batch_mut(id)?;
        if batch.phase != BatchPhase::Idle {
            return Err(StateError::BatchNotIdle {
                id,
                phase: batch.phase,
            });
        }
        batch.phase = BatchPhase::Submitting;

        for entry in self.entries.iter_mut().filter(|e| e.batch == id) {
            entry.transfer.start()?;
        }
        Ok(())
    }

    /// Spread `loaded` of `total` body bytes over the batch's files.
    ///
    /// Files occupy the body in slot order, so earlier files fill up first.
    pub fn record_progress(&mut self, id: BatchId, loaded: u64, total: u64) -> CoreResult<()> {
        self.expect_submitting(id)?;

        let payload: u64 = self
            .entries
            .iter()
            .filter(|e| e.batch == id)
            .map(|e| e.file.size)
            .sum();

        // Multipart framing makes the body a bit larger than the files
        let sent = if total == 0 {
            0
        } else {
            (loaded.min(total) as u128 * payload as u128 / total as u128) as u64
        };
        let body_done = total > 0 && loaded >= total;

        let mut offset = 0u64;
        for entry in self.entries.iter_mut().filter(|e| e.batch == id) {
            let size = entry.file.size;
            let progress = if size == 0 {
                if body_done { 100 } else { 0 }
            } else {
                percent(sent.saturating_sub(offset), size)
            };
            entry.transfer.advance(progress);
            offset += size;
        }
        Ok(())
    }

    /// Settle the batch with the server's answer.
    pub fn complete(
        &mut self,
        id: BatchId,
        outcome: Result<UploadResult, UploadError>,
    ) -> CoreResult<()> {
        self.expect_submitting(id)?;

        let succeeded = outcome.is_ok();
        for entry in self.entries.iter_mut().filter(|e| e.batch == id) {
            if succeeded {
                entry.transfer.succeed()?;
            } else {
                entry.transfer.fail()?;
            }
        }

        self.notice = Some(match &outcome {
            Ok(result) => Notice::Success(result.clone()),
            Err(err) => Notice::Error(err.clone()),
        });

        let batch = self.batch_mut(id)?;
        batch.phase = if succeeded {
            BatchPhase::Succeeded
        } else {
            BatchPhase::Failed
        };
        batch.outcome = Some(outcome);
        Ok(())
    }

    /// Apply a driver event to batch `id`.
    pub fn apply(&mut self, id: BatchId, event: BatchEvent) -> CoreResult<()> {
        match event {
            BatchEvent::Started => self.begin(id),
            BatchEvent::Progress { loaded, total } => self.record_progress(id, loaded, total),
            BatchEvent::Finished(outcome) => self.complete(id, outcome),
        }
    }

    /// Forget settled batches. Batches still in flight are kept.
    pub fn clear(&mut self) {
        let settled: Vec<BatchId> = self
            .batches
            .iter()
            .filter(|b| b.phase.is_settled())
            .map(|b| b.id)
            .collect();

        self.entries.retain(|e| !settled.contains(&e.batch));
        self.batches.retain(|b| !settled.contains(&b.id));

        if !self.is_busy() {
            self.notice = None;
        }
    }

    // =========================================================================
    // Drop zone
    // =========================================================================

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entry(&self, key: (BatchId, usize)) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn entries_for(&self, id: BatchId) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| e.batch == id)
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.batches.iter().any(|b| b.phase == BatchPhase::Submitting)
    }

    fn batch_mut(&mut self, id: BatchId) -> CoreResult<&mut Batch> {
        self.batches
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StateError::UnknownBatch(id))
    }

    fn expect_submitting(&self, id: BatchId) -> CoreResult<()> {
        let batch = self.batch(id).ok_or(StateError::UnknownBatch(id))?;
        if batch.phase != BatchPhase::Submitting {
            return Err(StateError::BatchNotSubmitting {
                id,
                phase: batch.phase,
            });
        }
        Ok(())
    }
}
