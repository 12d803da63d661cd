//! Gnome - Frontend Rust/Leptos Application
//!
//! A WebAssembly upload widget: drop or pick files, watch each one upload,
//! read how the organizer sorted them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (one RwSignal<UploadWidget>)                    │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection (drop zone + hidden file input)          │
//! │  ├── ResultPanel (summary or error)                         │
//! │  └── FileList (per-file status and progress)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Backend URL for this build
//! - [`components`] - UI components (Upload, FileList, ResultPanel, etc.)
//! - [`services`] - Backend communication (XHR upload)

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

use gnome::UploadWidget;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Mounts the application. Exported so the cdylib can be driven from JS.
#[wasm_bindgen]
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Gnome - Starting Leptos App ({})", upload_config().endpoint());

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Discarded with the page, nothing is persisted
    let widget = create_rw_signal(UploadWidget::new());

    view! {
        <div class="container">
            <Hero/>
            <UploadSection widget=widget/>
            <ResultPanel widget=widget/>
            <FileList widget=widget/>
        </div>

        <Footer/>
    }
}
