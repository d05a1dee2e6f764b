//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::{config_path, DEFAULT_RESULTS_DIR};
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// API server under test
    #[serde(default)]
    pub target: TargetConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Schema lookup settings
    #[serde(default)]
    pub schemas: SchemaConfig,
}

/// API server under test
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Base URL that `/posts` paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Total time allowed for a single request
    #[serde(default = "default_request")]
    pub request_secs: u64,

    /// Time allowed to establish a connection
    #[serde(default = "default_connect")]
    pub connect_secs: u64,
}

impl Timeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: default_request(),
            connect_secs: default_connect(),
        }
    }
}

fn default_request() -> u64 {
    30
}
fn default_connect() -> u64 {
    10
}

/// Report output configuration
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Directory that result and attachment files are written to
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Whether report files are written at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            enabled: default_enabled(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}
fn default_enabled() -> bool {
    true
}

/// Schema lookup configuration
#[derive(Debug, Deserialize, Default)]
pub struct SchemaConfig {
    /// Directory checked before the built-in schema documents
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
