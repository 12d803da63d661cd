//! UI Components for the Gnome upload page.
//!
//! # Layout Components
//! - [`Hero`] - Title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Drop zone and file picker
//! - [`FileList`] - Per-file status and progress
//! - [`ResultPanel`] - Upload summary or error

mod hero;
mod upload;
mod file_list;
mod result;
mod footer;

pub use hero::*;
pub use upload::*;
pub use file_list::*;
pub use result::*;
pub use footer::*;
