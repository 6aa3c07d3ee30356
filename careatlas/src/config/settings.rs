//! Settings struct, defaults, and INI parsing

use super::ConfigError;
use ini::Ini;

/// Country suffix appended to geocoding query candidates.
pub const DEFAULT_COUNTRY: &str = "Ghana";

/// Geocoding HTTP timeout.
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

/// Coverage-grid resolution in degrees (~55 km).
pub const DEFAULT_GRID_STEP_DEG: f64 = 0.5;

/// Default proximity-search radius.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Default log directory and file name.
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "careatlas.log";

/// User-tunable engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Country suffix for geocoding candidates.
    pub country: String,
    /// Geocoding HTTP timeout in seconds.
    pub geocode_timeout_secs: u64,
    /// Google Maps API key; the `GOOGLE_MAPS_API_KEY` environment
    /// variable takes precedence over this file value.
    pub google_api_key: Option<String>,
    /// Coverage-grid resolution in degrees.
    pub grid_step_deg: f64,
    /// Default proximity-search radius in kilometers.
    pub default_radius_km: f64,
    /// Log directory.
    pub log_dir: String,
    /// Log file name.
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            geocode_timeout_secs: DEFAULT_GEOCODE_TIMEOUT_SECS,
            google_api_key: None,
            grid_step_deg: DEFAULT_GRID_STEP_DEG,
            default_radius_km: DEFAULT_RADIUS_KM,
            log_dir: DEFAULT_LOG_DIR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Effective API key: environment first, then the config file.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(crate::geocode::API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| self.google_api_key.clone())
    }
}

/// Build settings from a parsed INI document, filling gaps with
/// defaults.
pub(super) fn parse_ini(ini: &Ini) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(section) = ini.section(Some("geocoding")) {
        if let Some(country) = section.get("country") {
            settings.country = country.to_string();
        }
        if let Some(raw) = section.get("timeout_secs") {
            settings.geocode_timeout_secs =
                parse_value("geocoding", "timeout_secs", raw)?;
        }
        if let Some(key) = section.get("google_api_key") {
            if !key.trim().is_empty() {
                settings.google_api_key = Some(key.trim().to_string());
            }
        }
    }

    if let Some(section) = ini.section(Some("analysis")) {
        if let Some(raw) = section.get("grid_step_deg") {
            settings.grid_step_deg = parse_value("analysis", "grid_step_deg", raw)?;
        }
        if let Some(raw) = section.get("default_radius_km") {
            settings.default_radius_km =
                parse_value("analysis", "default_radius_km", raw)?;
        }
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(dir) = section.get("log_dir") {
            settings.log_dir = dir.to_string();
        }
        if let Some(file) = section.get("log_file") {
            settings.log_file = file.to_string();
        }
    }

    Ok(settings)
}

fn parse_value<T: std::str::FromStr>(
    section: &str,
    key: &str,
    raw: &str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: raw.to_string(),
    })
}
