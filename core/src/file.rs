//! Selected file metadata.
//!
//! The category is a client-side guess used for the icon only. The backend
//! does its own classification.

use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const DOCUMENT_EXTENSIONS: [&str; 3] = ["pdf", "docx", "csv"];
const DOCUMENT_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/csv",
];

/// Rough kind of a file, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Other,
}

impl FileCategory {
    /// Guess from the mime type, then from the extension.
    pub fn infer(name: &str, mime: Option<&str>) -> Self {
        if let Some(mime) = mime.map(str::to_ascii_lowercase) {
            if mime.starts_with("image/") {
                return FileCategory::Image;
            }
            if DOCUMENT_MIME_TYPES.contains(&mime.as_str()) {
                return FileCategory::Document;
            }
        }

        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
            _ => return FileCategory::Other,
        };

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            FileCategory::Image
        } else if DOCUMENT_EXTENSIONS.contains(&extension.as_str()) {
            FileCategory::Document
        } else {
            FileCategory::Other
        }
    }

    /// Icon shown next to the file name.
    pub fn icon(&self) -> &'static str {
        match self {
            FileCategory::Image => "🖼️",
            FileCategory::Document => "📄",
            FileCategory::Other => "📦",
        }
    }
}

/// A file the user picked or dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// File name without directories
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Mime type reported by the platform, if any
    pub mime: Option<String>,
    /// Display category
    pub category: FileCategory,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, mime: Option<String>) -> Self {
        let name = name.into();
        let mime = mime.filter(|m| !m.is_empty());
        let category = FileCategory::infer(&name, mime.as_deref());
        Self {
            name,
            size,
            mime,
            category,
        }
    }

    /// Size as shown in the file list.
    pub fn size_label(&self) -> String {
        format_megabytes(self.size)
    }
}

/// `1572864` -> `"1.50 MB"`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_extension() {
        assert_eq!(FileCategory::infer("holiday.JPG", None), FileCategory::Image);
        assert_eq!(FileCategory::infer("thesis.docx", None), FileCategory::Document);
        assert_eq!(FileCategory::infer("ledger.csv", None), FileCategory::Document);
        assert_eq!(FileCategory::infer("archive.tar.gz", None), FileCategory::Other);
        assert_eq!(FileCategory::infer("Makefile", None), FileCategory::Other);
        assert_eq!(FileCategory::infer(".png", None), FileCategory::Other);
    }

    #[test]
    fn test_mime_wins_over_extension() {
        assert_eq!(FileCategory::infer("scan", Some("image/webp")), FileCategory::Image);
        assert_eq!(
            FileCategory::infer("report.bin", Some("application/pdf")),
            FileCategory::Document
        );
        // Unknown mime falls through to the extension
        assert_eq!(
            FileCategory::infer("notes.pdf", Some("application/octet-stream")),
            FileCategory::Document
        );
    }

    #[test]
    fn test_empty_mime_is_dropped() {
        let file = SelectedFile::new("photo.png", 10, Some(String::new()));
        assert_eq!(file.mime, None);
        assert_eq!(file.category, FileCategory::Image);
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1_572_864), "1.50 MB");
        assert_eq!(format_megabytes(16 * 1024 * 1024), "16.00 MB");
    }
}
