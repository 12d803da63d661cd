//! Inline notice: progress message, error text or the organize summary.

use leptos::*;

use gnome::{notice_text, stats_line, structure_lines, Notice, UploadWidget};

#[component]
pub fn ResultPanel(widget: RwSignal<UploadWidget>) -> impl IntoView {
    let notice = move || widget.with(|w| w.notice().cloned());

    move || {
        notice().map(|notice| match notice {
            Notice::Success(result) => {
                let structure = result
                    .stats
                    .folder_structure
                    .as_ref()
                    .filter(|s| !s.is_empty())
                    .map(|s| structure_lines(s).join("\n"));

                view! {
                    <div class="message success" id="message">
                        <p class="summary-message">{result.message.clone()}</p>
                        <p class="summary-stats">{stats_line(&result.stats)}</p>
                        {structure.map(|tree| view! { <pre class="folder-structure">{tree}</pre> })}
                    </div>
                }
                .into_view()
            }
            other => view! {
                <div class=format!("message {}", other.css_class()) id="message">
                    {notice_text(&other)}
                </div>
            }
            .into_view(),
        })
    }
}
