use std::fs;
use std::path::Path;

use serde::Deserialize;
use walkers::sources::MapboxStyle;

/// Map configuration file: `{ "mapbox": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    pub mapbox: MapboxConfig,
}

/// Tile source and initial-view settings.
///
/// `location` is `[lat, lon]`. An empty `token` makes the app fall back to
/// OpenStreetMap tiles, so the viewer works without a Mapbox account.
#[derive(Debug, Clone, Deserialize)]
pub struct MapboxConfig {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "type", default)]
    pub style: String,
    pub location: [f64; 2],
    pub zoomlevel: f64,
    /// Whether the country-label overlay starts enabled.
    #[serde(default)]
    pub label: bool,
}

impl MapConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl MapboxConfig {
    /// Maps the configured style name onto a Mapbox style, defaulting to
    /// streets for unknown names.
    pub fn mapbox_style(&self) -> MapboxStyle {
        match self.style.as_str() {
            "outdoors" => MapboxStyle::Outdoors,
            "light" => MapboxStyle::Light,
            "dark" => MapboxStyle::Dark,
            "satellite" => MapboxStyle::Satellite,
            _ => MapboxStyle::Streets,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O Error: {}", e),
            ConfigError::Json(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}
