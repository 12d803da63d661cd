//! Terminal output for a batch.

use serde::Serialize;
use std::collections::HashMap;

use gnome::{
    progress_label, BatchId, FileCategory, FileEntry, FileStatus, UploadResult, UploadWidget,
};

/// Prints a file row only when its status or percentage moved.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    last: HashMap<(BatchId, usize), (FileStatus, u8)>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that changed since the previous call.
    pub fn changes(&mut self, widget: &UploadWidget) -> Vec<String> {
        widget
            .entries()
            .iter()
            .filter_map(|entry| {
                let now = (entry.transfer.status(), entry.transfer.progress());
                match self.last.insert(entry.key(), now) {
                    Some(before) if before == now => None,
                    _ => Some(file_row(entry)),
                }
            })
            .collect()
    }
}

/// `"   ⏳ 📄 report.pdf (1.50 MB) 42%"`
pub fn file_row(entry: &FileEntry) -> String {
    format!(
        "   {} {} {} ({}) {}",
        entry.transfer.status().icon(),
        entry.file.category.icon(),
        entry.file.name,
        entry.file.size_label(),
        progress_label(entry)
    )
}

/// Machine-readable outcome for `--json`.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub files: Vec<FileReport<'a>>,
    pub result: &'a UploadResult,
}

#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub name: &'a str,
    pub size: u64,
    pub category: FileCategory,
    pub status: FileStatus,
    pub progress: u8,
}

impl<'a> BatchReport<'a> {
    pub fn new(widget: &'a UploadWidget, batch: BatchId, result: &'a UploadResult) -> Self {
        let files = widget
            .entries_for(batch)
            .map(|entry| FileReport {
                name: &entry.file.name,
                size: entry.file.size,
                category: entry.file.category,
                status: entry.transfer.status(),
                progress: entry.transfer.progress(),
            })
            .collect();
        Self { files, result }
    }
}
