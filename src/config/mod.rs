// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! settings to a `settings.toml` file.
//!
//! Every section and field has a default, so a partial file (or none at all)
//! yields a working setup. Out-of-range values are clamped when read through
//! the accessor methods.
//!
//! # Examples
//!
//! ```no_run
//! use map_capture::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.capture.settle_delay_ms = 1500;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.capture.settle_delay_ms, 1500);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::geo::{Coordinate, TileStyle, ViewportState, ZoomLevel};
use crate::domain::snapshot::{ScaleFactor, SettleDelay};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MapCapture";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding: GeocodingConfig,
    pub tiles: TilesConfig,
    pub capture: CaptureConfig,
    pub submission: SubmissionConfig,
    pub initial_view: InitialViewConfig,
}

/// `[geocoding]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODER_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl GeocodingConfig {
    /// Request timeout, clamped to the accepted range.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        clamp_timeout(self.timeout_secs)
    }
}

/// `[tiles]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    pub satellite_template: String,
    pub terrain_template: String,
    pub width: u32,
    pub height: u32,
    pub cache_capacity: usize,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            satellite_template: SATELLITE_TILE_TEMPLATE.to_string(),
            terrain_template: TERRAIN_TILE_TEMPLATE.to_string(),
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            cache_capacity: DEFAULT_TILE_CACHE_CAPACITY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl TilesConfig {
    /// URL template for `style`.
    #[must_use]
    pub fn template(&self, style: TileStyle) -> &str {
        match style {
            TileStyle::Satellite => &self.satellite_template,
            TileStyle::Terrain => &self.terrain_template,
        }
    }

    /// Surface size, each edge clamped to `[1, MAX_SURFACE_EDGE]`.
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        (
            self.width.clamp(1, MAX_SURFACE_EDGE),
            self.height.clamp(1, MAX_SURFACE_EDGE),
        )
    }

    /// Tile cache capacity, clamped to the accepted range.
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
            .clamp(MIN_TILE_CACHE_CAPACITY, MAX_TILE_CACHE_CAPACITY)
    }

    /// Request timeout, clamped to the accepted range.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        clamp_timeout(self.timeout_secs)
    }
}

/// `[capture]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Fixed wait before sampling, or the upper bound on waiting for the
    /// surface's tiles-loaded signal when `wait_for_tiles` is set.
    pub settle_delay_ms: u64,
    pub scale_factor: u32,
    pub wait_for_tiles: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            scale_factor: DEFAULT_SCALE_FACTOR,
            wait_for_tiles: true,
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn settle_delay(&self) -> SettleDelay {
        SettleDelay::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        ScaleFactor::new(self.scale_factor)
    }
}

/// `[submission]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUBMISSION_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl SubmissionConfig {
    /// Request timeout, clamped to the accepted range.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        clamp_timeout(self.timeout_secs)
    }
}

/// `[initial_view]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialViewConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub style: String,
}

impl Default for InitialViewConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            zoom: DEFAULT_ZOOM,
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl InitialViewConfig {
    /// The configured starting view. Invalid fields fall back to their defaults.
    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        let center = Coordinate::new(self.latitude, self.longitude).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid initial view center, using default");
            default_center()
        });
        let style = self.style.parse::<TileStyle>().unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid initial view style, using default");
            TileStyle::default()
        });
        ViewportState::new(center, ZoomLevel::new(self.zoom), style)
    }
}

fn default_center() -> Coordinate {
    Coordinate::from_valid(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
}

fn clamp_timeout(secs: u64) -> Duration {
    Duration::from_secs(secs.clamp(MIN_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS))
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable content falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "ignoring invalid settings file");
        Config::default()
    }))
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.capture.settle_delay_ms = 250;
        config.tiles.width = 800;
        config.initial_view.style = "terrain".to_string();

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[capture]\nscale_factor = 3\n").expect("failed to write");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.capture.scale().value(), 3);
        assert_eq!(loaded.capture.settle_delay_ms, DEFAULT_SETTLE_DELAY_MS);
        assert_eq!(loaded.geocoding.endpoint, DEFAULT_GEOCODER_ENDPOINT);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn initial_view_defaults_to_london_satellite() {
        let view = InitialViewConfig::default().viewport_state();
        assert_abs_diff_eq!(view.center.latitude(), 51.505);
        assert_abs_diff_eq!(view.center.longitude(), -0.09);
        assert_eq!(view.zoom.value(), 13);
        assert_eq!(view.style, TileStyle::Satellite);
    }

    #[test]
    fn invalid_initial_view_falls_back_per_field() {
        let config = InitialViewConfig {
            latitude: 123.0,
            longitude: 10.0,
            zoom: 40,
            style: "roadmap".to_string(),
        };
        let view = config.viewport_state();
        assert_abs_diff_eq!(view.center.latitude(), DEFAULT_LATITUDE);
        assert_eq!(view.zoom.value(), crate::domain::geo::zoom_bounds::MAX);
        assert_eq!(view.style, TileStyle::Satellite);
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let tiles = TilesConfig {
            width: 0,
            height: 100_000,
            cache_capacity: 1,
            timeout_secs: 0,
            ..TilesConfig::default()
        };
        assert_eq!(tiles.surface_size(), (1, MAX_SURFACE_EDGE));
        assert_eq!(tiles.cache_capacity(), MIN_TILE_CACHE_CAPACITY);
        assert_eq!(tiles.timeout(), Duration::from_secs(MIN_HTTP_TIMEOUT_SECS));
    }

    #[test]
    fn template_follows_style() {
        let tiles = TilesConfig::default();
        assert!(tiles.template(TileStyle::Satellite).contains("World_Imagery"));
        assert!(tiles.template(TileStyle::Terrain).contains("World_Topo_Map"));
    }
}
