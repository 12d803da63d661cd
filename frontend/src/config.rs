//! Application configuration.
//!
//! The backend URL is baked in at build time from `GNOME_API_URL`
//! (e.g. `GNOME_API_URL=https://files.example.org trunk build`).
//! Without it the local development backend is used.

use gnome::UploadConfig;

/// Displayed in the page title and the hero.
pub const APP_NAME: &str = "Gnome";

/// Upload configuration for this build.
pub fn upload_config() -> UploadConfig {
    UploadConfig::from_env_value(option_env!("GNOME_API_URL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_config_targets_upload_route() {
        let config = upload_config();
        assert!(config.endpoint().ends_with("/api/upload"));
        assert_eq!(config.field_name, "files[]");
    }
}
