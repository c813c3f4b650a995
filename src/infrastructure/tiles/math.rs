// SPDX-License-Identifier: MPL-2.0
//! Web Mercator tile arithmetic.
//!
//! World pixel coordinates at zoom `z` span `[0, 256 * 2^z)` on both axes,
//! with the origin at the north-west corner. Longitude wraps; latitude is
//! clamped to the Mercator limit.

use crate::domain::geo::{Coordinate, TileStyle, ViewportState, ZoomLevel};

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude beyond which Web Mercator is undefined.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Identifies one tile of one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub style: TileStyle,
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// A tile and where its top-left corner lands on the surface, in surface
/// pixels at scale 1. Offsets may be negative for partially visible tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub key: TileKey,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// World pixel position of `coordinate` at `zoom`.
#[must_use]
pub fn world_pixel(coordinate: Coordinate, zoom: ZoomLevel) -> (f64, f64) {
    let world = f64::from(TILE_SIZE) * f64::from(zoom.tiles_per_axis());

    let x = (coordinate.longitude() + 180.0) / 360.0 * world;

    let lat = coordinate
        .latitude()
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * world;

    (x, y)
}

/// Tiles covering a `width` × `height` surface showing `view`.
///
/// Columns wrap around the antimeridian. Rows outside the world are left out,
/// so a zoomed-out view near a pole has uncovered bands.
#[must_use]
pub fn visible_tiles(view: &ViewportState, width: u32, height: u32) -> Vec<TilePlacement> {
    let (center_x, center_y) = world_pixel(view.center, view.zoom);
    let left = (center_x - f64::from(width) / 2.0).floor() as i64;
    let top = (center_y - f64::from(height) / 2.0).floor() as i64;

    let tile = i64::from(TILE_SIZE);
    let tiles_per_axis = i64::from(view.zoom.tiles_per_axis());

    let first_col = left.div_euclid(tile);
    let last_col = (left + i64::from(width) - 1).div_euclid(tile);
    let first_row = top.div_euclid(tile).max(0);
    let last_row = (top + i64::from(height) - 1)
        .div_euclid(tile)
        .min(tiles_per_axis - 1);

    let mut placements = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            placements.push(TilePlacement {
                key: TileKey {
                    style: view.style,
                    z: view.zoom.value(),
                    x: col.rem_euclid(tiles_per_axis) as u32,
                    y: row as u32,
                },
                offset_x: (col * tile - left) as i32,
                offset_y: (row * tile - top) as i32,
            });
        }
    }
    placements
}

/// Fills `{z}`, `{y}` and `{x}` in a tile URL template.
#[must_use]
pub fn expand_template(template: &str, key: &TileKey) -> String {
    template
        .replace("{z}", &key.z.to_string())
        .replace("{y}", &key.y.to_string())
        .replace("{x}", &key.x.to_string())
}
