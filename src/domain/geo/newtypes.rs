// SPDX-License-Identifier: MPL-2.0
//! Map newtypes.
//!
//! Type-safe wrappers for map values, ensuring they are always within valid
//! ranges.

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Tile zoom level bounds.
pub mod zoom_bounds {
    /// Minimum zoom level (whole world in one tile).
    pub const MIN: u8 = 0;
    /// Maximum zoom level served by the default tile sources.
    pub const MAX: u8 = 19;
    /// Zoom level shown before any location is searched.
    pub const DEFAULT: u8 = 13;
    /// Zoom level applied when a query is located, regardless of place size.
    pub const DETAIL: u8 = 15;
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Integer tile zoom level, guaranteed to be within `[0, 19]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Creates a new zoom level, clamping the value to the valid range.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
    }

    /// Zoom level used after locating a query.
    #[must_use]
    pub fn detail() -> Self {
        Self(zoom_bounds::DETAIL)
    }

    /// Returns the raw level.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Number of tiles along one axis of the world at this level.
    #[must_use]
    pub fn tiles_per_axis(self) -> u32 {
        1u32 << self.0
    }

    /// Returns whether the zoom is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    /// Returns whether the zoom is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }

    /// One level closer.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level further out.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT)
    }
}
