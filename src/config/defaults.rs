// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Geocoding**: Lookup endpoint and HTTP identity
//! - **Tiles**: Tile source templates, surface size, tile cache bounds
//! - **Capture**: Settle delay and resolution scale
//! - **Submission**: Backend endpoint
//! - **Initial View**: Where the map starts before any search

// ==========================================================================
// Geocoding Defaults
// ==========================================================================

/// Nominatim-compatible search endpoint.
pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// User agent sent with every outgoing request. Nominatim rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "MapCapture/0.1.0";

/// Default per-request timeout (in seconds).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Minimum per-request timeout (in seconds).
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 1;

/// Maximum per-request timeout (in seconds).
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Tile Defaults
// ==========================================================================

/// Aerial imagery template. Rows come before columns in this source.
pub const SATELLITE_TILE_TEMPLATE: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// Topographic template.
pub const TERRAIN_TILE_TEMPLATE: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}";

/// Default surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: u32 = 512;

/// Default surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 256;

/// Largest accepted surface edge in pixels.
pub const MAX_SURFACE_EDGE: u32 = 4096;

/// Default number of decoded tiles kept in memory.
pub const DEFAULT_TILE_CACHE_CAPACITY: usize = 128;

/// Minimum tile cache capacity.
pub const MIN_TILE_CACHE_CAPACITY: usize = 16;

/// Maximum tile cache capacity.
pub const MAX_TILE_CACHE_CAPACITY: usize = 1024;

// ==========================================================================
// Capture Defaults
// ==========================================================================

/// Default wait before sampling the surface (in milliseconds).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1_000;

/// Default rasterization scale factor.
pub const DEFAULT_SCALE_FACTOR: u32 = 2;

// ==========================================================================
// Submission Defaults
// ==========================================================================

/// Backend endpoint receiving `{ image, location }`.
pub const DEFAULT_SUBMISSION_ENDPOINT: &str = "http://localhost:3000/api/submit-map";

// ==========================================================================
// Initial View Defaults
// ==========================================================================

/// Latitude shown before any search.
pub const DEFAULT_LATITUDE: f64 = 51.505;

/// Longitude shown before any search.
pub const DEFAULT_LONGITUDE: f64 = -0.09;

/// Zoom shown before any search.
pub const DEFAULT_ZOOM: u8 = 13;

/// Style shown before any search.
pub const DEFAULT_STYLE: &str = "satellite";
