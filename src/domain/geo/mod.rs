// SPDX-License-Identifier: MPL-2.0
//! Geographic value objects.
//!
//! These types describe *where* the map looks: the user's free-text query,
//! the resolved coordinate, the imagery style and the resulting viewport.

pub mod newtypes;

use std::fmt;
use std::str::FromStr;

pub use newtypes::{zoom_bounds, ZoomLevel};

use super::error::GeoError;

// =============================================================================
// Coordinate
// =============================================================================

/// A WGS84 coordinate, validated on construction.
///
/// Latitude is within `[-90, 90]` and longitude within `[-180, 180]`.
///
/// # Example
///
/// ```
/// use map_capture::domain::geo::Coordinate;
///
/// let nyc = Coordinate::new(40.75, -73.99).unwrap();
/// assert_eq!(nyc.latitude(), 40.75);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::LatitudeOutOfRange`] or [`GeoError::LongitudeOutOfRange`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a coordinate from values already known to be in range.
    pub(crate) const fn from_valid(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

// =============================================================================
// LocationQuery
// =============================================================================

/// Free-text location entered by the user. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Wraps the text, rejecting empty or whitespace-only input.
    ///
    /// The text is stored as typed; only the emptiness check trims it.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::EmptyQuery`] if the text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, GeoError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GeoError::EmptyQuery);
        }
        Ok(Self(text))
    }

    /// Returns the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TileStyle
// =============================================================================

/// Imagery used for the map background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileStyle {
    /// Aerial imagery.
    #[default]
    Satellite,
    /// Topographic rendering.
    Terrain,
}

impl TileStyle {
    /// Stable lowercase name, as used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TileStyle::Satellite => "satellite",
            TileStyle::Terrain => "terrain",
        }
    }

    /// Returns all styles.
    #[must_use]
    pub fn all() -> &'static [TileStyle] {
        &[TileStyle::Satellite, TileStyle::Terrain]
    }
}

impl FromStr for TileStyle {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "satellite" => Ok(TileStyle::Satellite),
            "terrain" => Ok(TileStyle::Terrain),
            other => Err(GeoError::UnknownStyle(other.to_string())),
        }
    }
}

impl fmt::Display for TileStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ViewportState
// =============================================================================

/// One coherent map view: center, zoom and style always change together
/// through [`MapViewport`](crate::viewport::MapViewport).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Map center.
    pub center: Coordinate,
    /// Tile zoom level.
    pub zoom: ZoomLevel,
    /// Imagery style.
    pub style: TileStyle,
}

impl ViewportState {
    /// Creates a viewport state.
    #[must_use]
    pub fn new(center: Coordinate, zoom: ZoomLevel, style: TileStyle) -> Self {
        Self {
            center,
            zoom,
            style,
        }
    }
}
