//! Per-file transfer state.
//!
//! Status only moves `idle → uploading → {success, error}`. Progress only
//! moves up while uploading.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StateError;

/// Where a file is in its upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl FileStatus {
    /// Whether `next` is a legal successor.
    pub fn can_become(self, next: FileStatus) -> bool {
        matches!(
            (self, next),
            (FileStatus::Idle, FileStatus::Uploading)
                | (FileStatus::Uploading, FileStatus::Success)
                | (FileStatus::Uploading, FileStatus::Error)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, FileStatus::Success | FileStatus::Error)
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            FileStatus::Idle => "file-idle",
            FileStatus::Uploading => "file-uploading",
            FileStatus::Success => "file-success",
            FileStatus::Error => "file-error",
        }
    }

    /// Get emoji for display.
    pub fn icon(&self) -> &'static str {
        match self {
            FileStatus::Idle => "📄",
            FileStatus::Uploading => "⏳",
            FileStatus::Success => "✅",
            FileStatus::Error => "❌",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileStatus::Idle => "idle",
            FileStatus::Uploading => "uploading",
            FileStatus::Success => "success",
            FileStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// Progress (0-100) and status of one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTransferState {
    progress: u8,
    status: FileStatus,
}

impl FileTransferState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    /// `idle → uploading`.
    pub fn start(&mut self) -> Result<(), StateError> {
        self.transition(FileStatus::Uploading)
    }

    /// Raise progress to `progress` (clamped to 100).
    ///
    /// Ignored unless uploading or when it would lower the value.
    /// Returns whether anything changed.
    pub fn advance(&mut self, progress: u8) -> bool {
        let progress = progress.min(100);
        if self.status != FileStatus::Uploading || progress <= self.progress {
            return false;
        }
        self.progress = progress;
        true
    }

    /// `uploading → success`, progress jumps to 100.
    pub fn succeed(&mut self) -> Result<(), StateError> {
        self.transition(FileStatus::Success)?;
        self.progress = 100;
        Ok(())
    }

    /// `uploading → error`, progress stays where it was.
    pub fn fail(&mut self) -> Result<(), StateError> {
        self.transition(FileStatus::Error)
    }

    fn transition(&mut self, next: FileStatus) -> Result<(), StateError> {
        if !self.status.can_become(next) {
            return Err(StateError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Whole percent of `loaded` out of `total`, 0 when `total` is unknown.
pub fn percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let loaded = loaded.min(total) as u128;
    ((loaded * 100) / total as u128) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = FileTransferState::new();
        assert_eq!(state.status(), FileStatus::Idle);

        state.start().unwrap();
        assert!(state.advance(40));
        assert!(state.advance(75));
        state.succeed().unwrap();

        assert_eq!(state.status(), FileStatus::Success);
        assert_eq!(state.progress(), 100);
    }

    #[test]
    fn test_progress_never_decreases() {
        let mut state = FileTransferState::new();
        state.start().unwrap();
        assert!(state.advance(60));
        assert!(!state.advance(30));
        assert!(!state.advance(60));
        assert_eq!(state.progress(), 60);
        assert!(state.advance(250));
        assert_eq!(state.progress(), 100);
    }

    #[test]
    fn test_progress_ignored_outside_upload() {
        let mut state = FileTransferState::new();
        assert!(!state.advance(50));
        assert_eq!(state.progress(), 0);

        state.start().unwrap();
        state.fail().unwrap();
        assert!(!state.advance(90));
        assert_eq!(state.progress(), 0);
    }

    #[test]
    fn test_status_never_regresses() {
        let mut state = FileTransferState::new();
        assert!(state.succeed().is_err());

        state.start().unwrap();
        assert!(state.start().is_err());
        state.succeed().unwrap();

        assert_eq!(
            state.start(),
            Err(StateError::InvalidTransition {
                from: FileStatus::Success,
                to: FileStatus::Uploading,
            })
        );
        assert!(state.fail().is_err());
        assert_eq!(state.status(), FileStatus::Success);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(50, 200), 25);
        assert_eq!(percent(199, 200), 99);
        assert_eq!(percent(500, 200), 100);
        assert_eq!(percent(u64::MAX, u64::MAX), 100);
    }
}
