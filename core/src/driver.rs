//! Batch submission.
//!
//! [`submit_batch`] is the one place that talks to the backend. The
//! platform provides an [`UploadTransport`]; the driver validates the
//! selection, issues exactly one request and reports what happened as
//! [`BatchEvent`]s.

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::file::SelectedFile;
use crate::response::{interpret_response, UploadResult};

/// Status and body of the backend's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// What happened to a batch, in order: `Started`, any number of
/// `Progress`, then `Finished`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchEvent {
    Started,
    /// Body bytes sent so far out of the body size
    Progress { loaded: u64, total: u64 },
    Finished(Result<UploadResult, UploadError>),
}

/// A platform file the widget can describe and upload.
pub trait FileHandle {
    fn describe(&self) -> SelectedFile;
}

/// Sends a multipart batch to the backend.
#[allow(async_fn_in_trait)]
pub trait UploadTransport {
    type Handle: FileHandle;

    /// POST `files` to `endpoint`, one part per file under `field_name`.
    ///
    /// `on_progress(loaded, total)` is called as the body goes out. Only a
    /// request that never completes is an error here; HTTP statuses are
    /// returned as-is.
    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[Self::Handle],
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<RawResponse, UploadError>;
}

/// Upload `files` as one batch.
///
/// An empty selection fails with [`UploadError::Validation`] before the
/// transport is touched and emits no events.
pub async fn submit_batch<T, F>(
    transport: &T,
    config: &UploadConfig,
    files: &[T::Handle],
    mut on_event: F,
) -> Result<UploadResult, UploadError>
where
    T: UploadTransport,
    F: FnMut(BatchEvent),
{
    if files.is_empty() {
        return Err(UploadError::no_files());
    }

    let endpoint = config.endpoint();
    log::info!("📤 Uploading {} file(s) to {}", files.len(), endpoint);
    on_event(BatchEvent::Started);

    let sent = transport
        .send(&endpoint, &config.field_name, files, &mut |loaded, total| {
            on_event(BatchEvent::Progress { loaded, total })
        })
        .await;

    let outcome = sent.and_then(|raw| interpret_response(raw.status, &raw.body));

    match &outcome {
        Ok(result) => log::info!(
            "✅ Upload successful: {} ({} images, {} documents, {} others)",
            result.message,
            result.stats.images,
            result.stats.documents,
            result.stats.others
        ),
        Err(UploadError::Network { detail }) => log::error!("❌ Upload failed: {}", detail),
        Err(e) => log::error!("❌ Upload failed ({}): {}", e.kind(), e),
    }

    on_event(BatchEvent::Finished(outcome.clone()));
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::FileStatus;
    use crate::widget::{BatchPhase, UploadWidget};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct MemFile {
        name: &'static str,
        size: u64,
    }

    impl FileHandle for MemFile {
        fn describe(&self) -> SelectedFile {
            SelectedFile::new(self.name, self.size, None)
        }
    }

    /// Answers every request with a canned response and records the calls.
    struct MockTransport {
        reply: Result<RawResponse, UploadError>,
        calls: Cell<usize>,
        seen: RefCell<Vec<(String, String, Vec<String>)>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self::with(Ok(RawResponse {
                status,
                body: body.to_string(),
            }))
        }

        fn with(reply: Result<RawResponse, UploadError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl UploadTransport for MockTransport {
        type Handle = MemFile;

        async fn send(
            &self,
            endpoint: &str,
            field_name: &str,
            files: &[MemFile],
            on_progress: &mut dyn FnMut(u64, u64),
        ) -> Result<RawResponse, UploadError> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push((
                endpoint.to_string(),
                field_name.to_string(),
                files.iter().map(|f| f.name.to_string()).collect(),
            ));

            let total: u64 = files.iter().map(|f| f.size).sum();
            on_progress(total / 2, total);
            on_progress(total, total);
            self.reply.clone()
        }
    }

    const SUCCESS: &str = r#"{
        "message": "Files uploaded and organized successfully",
        "stats": {"images": 2, "documents": 1, "others": 0,
                  "folder_structure": {"Images": ["Photos"]}}
    }"#;

    fn batch() -> Vec<MemFile> {
        vec![
            MemFile { name: "a.png", size: 40 },
            MemFile { name: "b.jpg", size: 40 },
            MemFile { name: "c.pdf", size: 20 },
        ]
    }

    /// Run a full selection + submission through a widget.
    fn run(
        transport: &MockTransport,
        files: Vec<MemFile>,
    ) -> (UploadWidget, Result<UploadResult, UploadError>) {
        let mut widget = UploadWidget::new();
        let described = files.iter().map(FileHandle::describe).collect();
        let id = match widget.select_files(described) {
            Ok(id) => id,
            Err(e) => return (widget, Err(e)),
        };

        let widget = RefCell::new(widget);
        let result = block_on(submit_batch(transport, &UploadConfig::default(), &files, |event| {
            widget.borrow_mut().apply(id, event).unwrap();
        }));
        (widget.into_inner(), result)
    }

    #[test]
    fn test_empty_selection_sends_nothing() {
        let transport = MockTransport::replying(200, SUCCESS);
        let mut events = Vec::new();
        let config = UploadConfig::default();
        let result = block_on(submit_batch(&transport, &config, &[], |e| events.push(e)));

        assert_eq!(result, Err(UploadError::no_files()));
        assert_eq!(transport.calls.get(), 0);
        assert!(events.is_empty());

        let (widget, result) = run(&transport, vec![]);
        assert!(matches!(result, Err(UploadError::Validation(_))));
        assert_eq!(transport.calls.get(), 0);
        assert!(widget.notice().is_some());
    }

    #[test]
    fn test_one_request_per_batch() {
        let transport = MockTransport::replying(200, SUCCESS);

        let (widget, result) = run(&transport, batch());
        assert!(result.is_ok());
        assert_eq!(transport.calls.get(), 1);

        let seen = transport.seen.borrow();
        let (endpoint, field, names) = &seen[0];
        assert_eq!(endpoint, "http://localhost:5001/api/upload");
        assert_eq!(field, "files[]");
        assert_eq!(names, &vec!["a.png", "b.jpg", "c.pdf"]);

        assert!(widget
            .entries()
            .iter()
            .all(|e| e.transfer.status() == FileStatus::Success && e.transfer.progress() == 100));
    }

    #[test]
    fn test_event_order() {
        let transport = MockTransport::replying(200, SUCCESS);
        let mut events = Vec::new();
        let config = UploadConfig::default();
        block_on(submit_batch(&transport, &config, &batch(), |e| events.push(e))).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(events[0], BatchEvent::Started);
        assert_eq!(events[1], BatchEvent::Progress { loaded: 50, total: 100 });
        assert_eq!(events[2], BatchEvent::Progress { loaded: 100, total: 100 });
        assert!(matches!(events[3], BatchEvent::Finished(Ok(_))));
    }

    #[test]
    fn test_repeated_batches_are_not_deduplicated() {
        let transport = MockTransport::replying(200, SUCCESS);
        run(&transport, batch()).1.unwrap();
        run(&transport, batch()).1.unwrap();
        assert_eq!(transport.calls.get(), 2);
    }

    #[test]
    fn test_server_error_message() {
        let transport = MockTransport::replying(500, r#"{"error":"disk full"}"#);
        let (widget, result) = run(&transport, batch());

        assert_eq!(result.unwrap_err().to_string(), "disk full");
        let batch = &widget.batches()[0];
        assert_eq!(batch.phase, BatchPhase::Failed);
        assert!(widget
            .entries()
            .iter()
            .all(|e| e.transfer.status() == FileStatus::Error));
    }

    #[test]
    fn test_network_failure() {
        let transport = MockTransport::with(Err(UploadError::network("connection refused")));
        let (widget, result) = run(&transport, batch());

        assert!(matches!(result, Err(UploadError::Network { .. })));
        assert_eq!(widget.batches()[0].phase, BatchPhase::Failed);
    }

    #[test]
    fn test_custom_endpoint() {
        let transport = MockTransport::replying(200, SUCCESS);
        let config = UploadConfig::new("http://localhost:5000")
            .with_upload_path("/upload")
            .with_field_name("upload");
        block_on(submit_batch(&transport, &config, &batch(), |_| {})).unwrap();

        let seen = transport.seen.borrow();
        assert_eq!(seen[0].0, "http://localhost:5000/upload");
        assert_eq!(seen[0].1, "upload");
    }
}
