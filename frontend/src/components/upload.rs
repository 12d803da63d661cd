//! Drop zone and file picker.
//!
//! Dropped and picked files go through the same path: a new batch in the
//! widget, then one upload spawned for it.

use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use gnome::{submit_batch, FileHandle, UploadWidget};

use crate::services::{files_from_list, WebFile, XhrTransport};
use crate::upload_config;

/// CSS class of the drop zone.
pub fn zone_class(dragging: bool) -> &'static str {
    if dragging {
        "upload-section dragover"
    } else {
        "upload-section"
    }
}

/// Select `files` as a batch and upload it in the background.
fn handle_files(widget: RwSignal<UploadWidget>, files: Vec<WebFile>) {
    let described = files.iter().map(FileHandle::describe).collect();

    let id = match widget.try_update(|w| w.select_files(described)) {
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            log::warn!("⚠️ {}", e);
            return;
        }
        None => return,
    };

    spawn_local(async move {
        let config = upload_config();
        let _ = submit_batch(&XhrTransport, &config, &files, move |event| {
            widget.update(|w| {
                if let Err(e) = w.apply(id, event) {
                    log::warn!("Ignoring event for {}: {}", id, e);
                }
            });
        })
        .await;
    });
}

#[component]
pub fn UploadSection(widget: RwSignal<UploadWidget>) -> impl IntoView {
    let file_input = create_node_ref::<html::Input>();
    let is_uploading = move || widget.with(|w| w.is_busy());

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = files_from_list(input.files());
        // Allow picking the same files again
        input.set_value("");
        handle_files(widget, files);
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        if !widget.with_untracked(|w| w.is_dragging()) {
            widget.update(|w| w.set_dragging(true));
        }
    };

    let on_drag_leave = move |_: DragEvent| {
        widget.update(|w| w.set_dragging(false));
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        widget.update(|w| w.set_dragging(false));
        let files = files_from_list(ev.data_transfer().and_then(|dt| dt.files()));
        handle_files(widget, files);
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || zone_class(widget.with(|w| w.is_dragging()))
            id="dropZone"
            on:click=trigger_file_input
            on:dragenter=on_drag_over
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if is_uploading() {
                    "⏳ Uploading and organizing files..."
                } else {
                    "Drag & drop files here"
                }}
            </div>
            <div class="upload-hint">"or click to browse"</div>
            <div class="upload-hint mt-20">
                "Supports images, documents, and other file types"
            </div>
            <span class="upload-button">"Browse files"</span>
        </div>

        <input
            type="file"
            id="fileInput"
            multiple=true
            style="display:none"
            node_ref=file_input
            on:change=on_file_change
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_class() {
        assert_eq!(zone_class(false), "upload-section");
        assert_eq!(zone_class(true), "upload-section dragover");
    }
}
