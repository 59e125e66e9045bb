//! Reading and writing the TOML configuration file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [remote]
//! base_url = "https://openlibrary.org"
//! site_base = "https://openlibrary.org"
//! archive_base = "https://archive.org/download"
//! result_cap = 10
//! timeout_secs = 5
//!
//! [display]
//! max_title_width = 50
//! color = true
//!
//! [logging]
//! level = "warn"
//! json = false
//! ```

use std::path::Path;

use super::Config;

/// Read a configuration file without applying environment overrides
pub fn read_config_file(path: &Path) -> Result<Config, ConfigFileError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
}

/// Write `config` to `path` as TOML, creating parent directories as needed
pub fn write_config_file(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
