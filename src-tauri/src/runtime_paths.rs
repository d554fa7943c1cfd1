use std::path::PathBuf;

use crate::APP_NAME;

/// Per-user application data root: `%APPDATA%` on Windows,
/// `~/Library/Application Support` on macOS, `$XDG_CONFIG_HOME` elsewhere.
pub fn default_app_data_dir() -> Option<PathBuf> {
    dirs::config_dir()
}

pub fn default_app_root_dir() -> Option<PathBuf> {
    default_app_data_dir().map(|dir| dir.join(APP_NAME))
}
