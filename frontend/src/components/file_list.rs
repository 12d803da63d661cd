use leptos::*;

use gnome::{progress_label, BatchId, FileEntry, UploadWidget};

#[component]
pub fn FileList(widget: RwSignal<UploadWidget>) -> impl IntoView {
    let keys = move || {
        widget.with(|w| w.entries().iter().map(FileEntry::key).collect::<Vec<_>>())
    };

    view! {
        <Show
            when=move || widget.with(|w| !w.entries().is_empty())
            fallback=|| view! { }
        >
            <div class="file-list">
                <div class="file-list-header">
                    <span class="file-list-title">"📋 Files"</span>
                    <button
                        class="file-list-clear"
                        on:click=move |_| widget.update(|w| w.clear())
                    >
                        "Clear"
                    </button>
                </div>
                <For
                    each=keys
                    key=|entry_key| *entry_key
                    children=move |entry_key| view! { <FileRow widget=widget entry_key=entry_key/> }
                />
            </div>
        </Show>
    }
}

#[component]
fn FileRow(widget: RwSignal<UploadWidget>, entry_key: (BatchId, usize)) -> impl IntoView {
    let entry = move || widget.with(|w| w.entry(entry_key).cloned());

    move || {
        entry().map(|entry| {
            let status = entry.transfer.status();
            let width = format!("width: {}%;", entry.transfer.progress());
            view! {
                <div class=format!("file-entry {}", status.css_class())>
                    <div class="file-row">
                        <span class="file-status">{status.icon()}</span>
                        <span class="file-icon">{entry.file.category.icon()}</span>
                        <div class="file-info">
                            <p class="file-name">{entry.file.name.clone()}</p>
                            <p class="file-size">{entry.file.size_label()}</p>
                        </div>
                        <span class="file-progress">{progress_label(&entry)}</span>
                    </div>
                    <div class="progress-bar">
                        <div class="progress-fill" style=width></div>
                    </div>
                </div>
            }
        })
    }
}
