//! Text rendering of the widget state.
//!
//! Pure functions over the model. The browser shell turns the lines into
//! elements; the CLI prints them.

use crate::response::{FolderStructure, UploadResult, UploadStats};
use crate::widget::{FileEntry, Notice};

/// `"Images: 2, Documents: 1, Others: 0"`
pub fn stats_line(stats: &UploadStats) -> String {
    format!(
        "Images: {}, Documents: {}, Others: {}",
        stats.images, stats.documents, stats.others
    )
}

/// Tree of the organized folders, one line per category and one per
/// category/subcategory pair.
pub fn structure_lines(structure: &FolderStructure) -> Vec<String> {
    let mut lines = vec!["Organized Structure:".to_string()];
    for (category, subcategories) in structure.iter() {
        lines.push(format!("{}/", category));
        lines.extend(subcategories.iter().map(|sub| format!("  └── {}/", sub)));
    }
    lines
}

/// Message, counts, then the folder tree when there is one.
pub fn summary_lines(result: &UploadResult) -> Vec<String> {
    let mut lines = vec![result.message.clone(), stats_line(&result.stats)];
    if let Some(structure) = result.stats.folder_structure.as_ref().filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.extend(structure_lines(structure));
    }
    lines
}

/// Whatever the notice area should say.
pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::Info(text) => text.clone(),
        Notice::Success(result) => summary_lines(result).join("\n"),
        Notice::Error(err) => err.to_string(),
    }
}

/// `"42%"`
pub fn progress_label(entry: &FileEntry) -> String {
    format!("{}%", entry.transfer.progress())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::response::interpret_response;

    fn sample() -> UploadResult {
        interpret_response(
            200,
            r#"{"message":"Files uploaded and organized successfully",
                "stats":{"images":2,"documents":1,"others":0,
                         "folder_structure":{"Images":["Photos"]}}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_contains_message_counts_and_pairs() {
        let lines = summary_lines(&sample());

        assert_eq!(lines[0], "Files uploaded and organized successfully");
        assert_eq!(lines[1], "Images: 2, Documents: 1, Others: 0");
        assert_eq!(
            &lines[2..],
            ["", "Organized Structure:", "Images/", "  └── Photos/"]
        );
    }

    #[test]
    fn test_one_line_per_pair() {
        let structure = FolderStructure::new(vec![
            ("Education".into(), vec!["Assignments".into(), "Exercises".into()]),
            ("Personal".into(), vec!["Other".into()]),
            ("Empty".into(), vec![]),
        ]);
        let lines = structure_lines(&structure);

        let pairs = lines.iter().filter(|l| l.starts_with("  └── ")).count();
        assert_eq!(pairs, 3);
        assert_eq!(
            lines,
            vec![
                "Organized Structure:",
                "Education/",
                "  └── Assignments/",
                "  └── Exercises/",
                "Personal/",
                "  └── Other/",
                "Empty/",
            ]
        );
    }

    #[test]
    fn test_summary_without_structure() {
        let mut result = sample();
        result.stats.folder_structure = None;
        assert_eq!(summary_lines(&result).len(), 2);

        result.stats.folder_structure = Some(FolderStructure::default());
        assert_eq!(summary_lines(&result).len(), 2);
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(
            notice_text(&Notice::Info("Uploading files...".into())),
            "Uploading files..."
        );

        let err = interpret_response(500, "oops").unwrap_err();
        assert_eq!(notice_text(&Notice::Error(err)), "HTTP error! status: 500");

        assert_eq!(
            notice_text(&Notice::Error(UploadError::no_files())),
            "Please select files to upload"
        );

        let text = notice_text(&Notice::Success(sample()));
        assert!(text.starts_with("Files uploaded and organized successfully\n"));
        assert!(text.ends_with("  └── Photos/"));
    }
}
