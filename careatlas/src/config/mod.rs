//! Configuration file handling for ~/.careatlas/config.ini.
//!
//! Loads user configuration with sensible defaults; a missing file is
//! not an error. Settings structs and parsing live in
//! [`settings`](self::settings).

mod settings;

pub use settings::{
    Settings, DEFAULT_COUNTRY, DEFAULT_GEOCODE_TIMEOUT_SECS, DEFAULT_GRID_STEP_DEG,
    DEFAULT_LOG_DIR, DEFAULT_LOG_FILE, DEFAULT_RADIUS_KM,
};

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {section}.{key} = '{value}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

impl Settings {
    /// Load configuration from the default path (~/.careatlas/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        settings::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.careatlas).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".careatlas")
}

/// Get the path to the config file (~/.careatlas/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.ini");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[geocoding]\ncountry = Togo\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.country, "Togo");
        assert_eq!(settings.grid_step_deg, DEFAULT_GRID_STEP_DEG);
        assert_eq!(settings.default_radius_km, DEFAULT_RADIUS_KM);
    }

    #[test]
    fn test_load_full_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(
            &path,
            "[geocoding]\n\
             country = Ghana\n\
             timeout_secs = 20\n\
             google_api_key = abc123\n\
             \n\
             [analysis]\n\
             grid_step_deg = 0.25\n\
             default_radius_km = 75\n\
             \n\
             [logging]\n\
             log_dir = /tmp/ca-logs\n\
             log_file = atlas.log\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.geocode_timeout_secs, 20);
        assert_eq!(settings.google_api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.grid_step_deg, 0.25);
        assert_eq!(settings.default_radius_km, 75.0);
        assert_eq!(settings.log_dir, "/tmp/ca-logs");
        assert_eq!(settings.log_file, "atlas.log");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        std::fs::write(&path, "[analysis]\ngrid_step_deg = half a degree\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_config_file_path_under_home() {
        let path = config_file_path();
        assert!(path.ends_with(".careatlas/config.ini"));
    }
}
