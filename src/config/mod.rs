//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ENGINEER_VAULT_*` environment variables (nested keys use `__`, e.g.
//! `ENGINEER_VAULT_REMOTE__TIMEOUT_SECS=3`).

mod file_config;

pub use file_config::{read_config_file, write_config_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "engineer-vault.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "ENGINEER_VAULT";

/// Default number of remote results kept per lookup
pub const DEFAULT_RESULT_CAP: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote book lookup settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Terminal rendering settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the search API (`{base_url}/search.json`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL prepended to record keys for the online view link
    #[serde(default = "default_site_base")]
    pub site_base: String,

    /// Base URL for archive downloads (`{archive_base}/{id}/{id}.pdf`)
    #[serde(default = "default_archive_base")]
    pub archive_base: String,

    /// Maximum number of books kept from one response
    #[serde(default = "default_result_cap")]
    pub result_cap: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent; defaults to `engineer-vault/<version>`
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_base: default_site_base(),
            archive_base: default_archive_base(),
            result_cap: default_result_cap(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_site_base() -> String {
    "https://openlibrary.org".to_string()
}

fn default_archive_base() -> String {
    "https://archive.org/download".to_string()
}

fn default_result_cap() -> usize {
    DEFAULT_RESULT_CAP
}

fn default_timeout_secs() -> u64 {
    5
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum width of the title column in tables
    #[serde(default = "default_max_title_width")]
    pub max_title_width: usize,

    /// Use colors in the interactive shell
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_title_width: default_max_title_width(),
            color: true,
        }
    }
}

fn default_max_title_width() -> usize {
    50
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `RUST_LOG` nor `-v`/`-q` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of the human-readable format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from an optional file plus environment overrides
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find the first config file that exists in the default locations
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|p| p.is_file())
}

/// Per-user config path, e.g. `~/.config/engineer-vault/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("engineer-vault").join("config.toml"))
}
