//! # Gnome client - command-line uploader
//!
//! Headless counterpart of the browser upload widget. Files named on the
//! command line go through the same [`gnome::UploadWidget`] and
//! [`gnome::submit_batch`] as the browser, over a reqwest transport.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CLI paths  │────▶│  LocalFile  │────▶│ submit_batch│────▶│  organizer  │
//! │   (clap)    │     │   (stat)    │     │  (widget)   │     │   backend   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gnome::UploadConfig;
//! use gnome_client::{upload_files, LocalFile};
//!
//! #[tokio::main]
//! async fn main() {
//!     let files = vec![LocalFile::open("scan.pdf").unwrap()];
//!     let (_widget, _batch, result) = upload_files(&UploadConfig::default(), files, |_| {}).await.unwrap();
//!     println!("{}", result.unwrap().message);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Client error types
//! - [`transport`] - reqwest multipart transport with progress
//! - [`report`] - Terminal and JSON output

pub mod error;
pub mod report;
pub mod transport;

use gnome::{
    submit_batch, BatchId, FileHandle, UploadConfig, UploadError, UploadResult, UploadWidget,
};

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ClientError, ClientResult};

pub use report::{file_row, BatchReport, FileReport, ProgressReporter};

pub use transport::{HttpTransport, LocalFile};

// =============================================================================
// Batch
// =============================================================================

/// Outcome of one CLI batch: the widget after settling, the batch id and
/// the server's answer.
pub type BatchOutcome = (UploadWidget, BatchId, Result<UploadResult, UploadError>);

/// Select `files` as one batch and upload them.
///
/// `on_update` sees the widget after every state change. An empty list
/// fails with the validation error and a file that can no longer be read
/// fails with [`ClientError::Io`]. Neither sends anything.
pub async fn upload_files(
    config: &UploadConfig,
    files: Vec<LocalFile>,
    mut on_update: impl FnMut(&UploadWidget),
) -> ClientResult<BatchOutcome> {
    for file in &files {
        file.reader().await?;
    }

    let mut widget = UploadWidget::new();
    let id = widget.select_files(files.iter().map(FileHandle::describe).collect())?;
    on_update(&widget);

    let transport = HttpTransport::new()?;
    let result = submit_batch(&transport, config, &files, |event| {
        if let Err(e) = widget.apply(id, event) {
            log::warn!("Ignoring event for {}: {}", id, e);
        }
        on_update(&widget);
    })
    .await;

    Ok((widget, id, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, routing::post, Router};
    use gnome::{BatchPhase, FileStatus};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_selection_is_rejected() {
        let mut updates = 0;
        let err = upload_files(&UploadConfig::default(), vec![], |_| updates += 1)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Upload(UploadError::Validation(_))));
        assert_eq!(err.to_string(), "Please select files to upload");
        assert_eq!(updates, 0);
    }

    #[tokio::test]
    async fn test_unreachable_backend_settles_batch() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "title,year\n").unwrap();
        let files = vec![LocalFile::open(&path).unwrap()];

        let mut statuses = Vec::new();
        let (widget, id, result) = upload_files(
            &UploadConfig::new(format!("http://{}", addr)),
            files,
            |w| statuses.push(w.entries()[0].transfer.status()),
        )
        .await
        .unwrap();

        assert!(matches!(result, Err(UploadError::Network { .. })));
        assert_eq!(widget.batch(id).unwrap().phase, BatchPhase::Failed);
        assert_eq!(statuses.first(), Some(&FileStatus::Idle));
        assert_eq!(statuses.last(), Some(&FileStatus::Error));
        // Never goes backwards
        assert!(statuses.windows(2).all(|w| w[0] == w[1] || w[0].can_become(w[1])));
    }

    #[tokio::test]
    async fn test_removed_file_fails_before_sending() {
        let requests = Arc::new(AtomicU64::new(0));
        let counter = requests.clone();
        let router = Router::new().route(
            "/api/upload",
            post(move |mut multipart: Multipart| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                while let Ok(Some(field)) = multipart.next_field().await {
                    let _ = field.bytes().await;
                }
                "{}"
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("kept.png");
        let gone = dir.path().join("a.csv");
        std::fs::write(&kept, [0u8; 16]).unwrap();
        std::fs::write(&gone, "title,year\n").unwrap();
        let files = vec![
            LocalFile::open(&kept).unwrap(),
            LocalFile::open(&gone).unwrap(),
        ];
        std::fs::remove_file(&gone).unwrap();

        let mut updates = 0;
        let err = upload_files(
            &UploadConfig::new(format!("http://{}", addr)),
            files,
            |_| updates += 1,
        )
        .await
        .unwrap_err();

        match &err {
            ClientError::Io { path, .. } => assert_eq!(path, &gone),
            other => panic!("expected an I/O error, got {:?}", other),
        }
        assert!(err.to_string().contains("a.csv"));
        assert_eq!(updates, 0);
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }
}
