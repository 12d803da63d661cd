//! XHR transport for browser files.
//!
//! `fetch` cannot report upload progress, so the batch goes out through
//! `XMLHttpRequest` and `upload.onprogress` drives the per-file bars.

use futures::channel::mpsc;
use futures::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FileList, FormData, ProgressEvent, XmlHttpRequest};

use gnome::{FileHandle, RawResponse, SelectedFile, UploadError, UploadTransport};

/// A file from the picker or a drop.
#[derive(Clone, Debug)]
pub struct WebFile(pub File);

impl FileHandle for WebFile {
    fn describe(&self) -> SelectedFile {
        SelectedFile::new(self.0.name(), self.0.size() as u64, Some(self.0.type_()))
    }
}

/// Collect a `FileList` (input `files` or `DataTransfer.files`).
pub fn files_from_list(list: Option<FileList>) -> Vec<WebFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(WebFile)
        .collect()
}

/// What the XHR callbacks report back to the waiting future.
enum XhrEvent {
    Progress { loaded: u64, total: u64 },
    Loaded,
    Failed(&'static str),
}

fn js_error(context: &str, err: JsValue) -> UploadError {
    UploadError::network(format!("{}: {:?}", context, err))
}

/// Browser [`UploadTransport`] over `XMLHttpRequest`.
#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

impl UploadTransport for XhrTransport {
    type Handle = WebFile;

    async fn send(
        &self,
        endpoint: &str,
        field_name: &str,
        files: &[WebFile],
        on_progress: &mut dyn FnMut(u64, u64),
    ) -> Result<RawResponse, UploadError> {
        // One part per file, all under the same field name
        let form = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;
        for file in files {
            form.append_with_blob_and_filename(field_name, &file.0, &file.0.name())
                .map_err(|e| js_error("Failed to append file", e))?;
        }

        let xhr = XmlHttpRequest::new().map_err(|e| js_error("Failed to create request", e))?;
        xhr.open_with_async("POST", endpoint, true)
            .map_err(|e| js_error("Failed to open request", e))?;
        let upload = xhr
            .upload()
            .map_err(|e| js_error("Upload events unavailable", e))?;

        let (tx, mut rx) = mpsc::unbounded::<XhrEvent>();

        let progress_tx = tx.clone();
        let onprogress = Closure::wrap(Box::new(move |ev: ProgressEvent| {
            if ev.length_computable() {
                let _ = progress_tx.unbounded_send(XhrEvent::Progress {
                    loaded: ev.loaded() as u64,
                    total: ev.total() as u64,
                });
            }
        }) as Box<dyn FnMut(ProgressEvent)>);
        upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

        let load_tx = tx.clone();
        let onload = Closure::wrap(Box::new(move |_: Event| {
            let _ = load_tx.unbounded_send(XhrEvent::Loaded);
        }) as Box<dyn FnMut(Event)>);
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));

        let error_tx = tx.clone();
        let onerror = Closure::wrap(Box::new(move |_: Event| {
            let _ = error_tx.unbounded_send(XhrEvent::Failed("network error"));
        }) as Box<dyn FnMut(Event)>);
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let onabort = Closure::wrap(Box::new(move |_: Event| {
            let _ = tx.unbounded_send(XhrEvent::Failed("request aborted"));
        }) as Box<dyn FnMut(Event)>);
        xhr.set_onabort(Some(onabort.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form))
            .map_err(|e| js_error("Failed to send request", e))?;

        let outcome = loop {
            match rx.next().await {
                Some(XhrEvent::Progress { loaded, total }) => on_progress(loaded, total),
                Some(XhrEvent::Loaded) => break Ok(()),
                Some(XhrEvent::Failed(reason)) => break Err(UploadError::network(reason)),
                None => break Err(UploadError::network("request dropped")),
            }
        };

        // Detach before the closures are dropped
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        drop((onprogress, onload, onerror, onabort));

        outcome?;

        let status = xhr
            .status()
            .map_err(|e| js_error("Failed to read status", e))?;
        let body = xhr
            .response_text()
            .map_err(|e| js_error("Failed to read response", e))?
            .unwrap_or_default();

        Ok(RawResponse { status, body })
    }
}
