//! Configuration and report locations
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/posts-api/`
//! - macOS: `~/Library/Application Support/posts-api/`
//! - Windows: `%APPDATA%\posts-api\`

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "posts-api";

/// Default results directory, relative to the working directory
pub const DEFAULT_RESULTS_DIR: &str = "allure-results";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
