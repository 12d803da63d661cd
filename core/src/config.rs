//! Upload endpoint configuration.
//!
//! The backend base URL is the only environment-specific value. The browser
//! build bakes it in at compile time, the CLI reads it at startup.

/// Local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Path of the upload route on the backend.
pub const DEFAULT_UPLOAD_PATH: &str = "/api/upload";

/// Multipart field name repeated once per file.
pub const FILES_FIELD: &str = "files[]";

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "GNOME_API_URL";

/// Where and how a batch is posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    /// Backend base URL, e.g. `http://localhost:5001`
    pub base_url: String,
    /// Upload route, e.g. `/api/upload`
    pub upload_path: String,
    /// Multipart field name shared by every file part
    pub field_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl UploadConfig {
    /// Config for `base_url` with the default path and field name.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            field_name: FILES_FIELD.to_string(),
        }
    }

    /// Build from an optional `GNOME_API_URL` value.
    ///
    /// Missing or blank values fall back to [`DEFAULT_BASE_URL`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// Set the upload route.
    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = path.into();
        self
    }

    /// Set the multipart field name.
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Full URL of the upload route.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path.trim_start_matches('/')
        )
    }
}
