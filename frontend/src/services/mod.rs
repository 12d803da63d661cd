//! Backend communication.
//!
//! # Services
//!
//! - [`upload`] - Multipart batch upload over `XMLHttpRequest`

pub mod upload;

pub use upload::*;
