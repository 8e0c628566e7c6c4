//! Tracker config loading
//!
//! The tracker config is a single TOML file holding the policy flags, the
//! global transform offsets and the `[[content]]` marker table. It is read
//! once at startup.

use std::fs;
use std::path::{Path, PathBuf};

use tether_types::TrackerConfig;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "tracker.toml";

/// Errors that can occur during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Serialize error for {path:?}: {source}")]
    SerializeError {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
}

/// Load a tracker config file
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a tracker config, falling back to defaults if the file does not exist.
///
/// Parse errors and other IO errors are still returned.
pub fn load_config_or_default(path: &Path) -> Result<TrackerConfig, ConfigError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No tracker config found, using defaults");
        return Ok(TrackerConfig::default());
    }
    load_config(path)
}

/// Save a config to a TOML file
pub fn save_config(path: &Path, config: &TrackerConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Get the default tracker config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tether").join(CONFIG_FILE_NAME))
}
