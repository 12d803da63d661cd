//! Hero section component

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>{APP_NAME}</h1>
            <p class="subtitle">
                "Drag and drop your files to begin uploading. "
                "They are sorted into folders once they reach the server."
            </p>
        </div>
    }
}
