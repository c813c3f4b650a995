// SPDX-License-Identifier: MPL-2.0
//! LRU cache of fetched tiles.
//!
//! # Design
//!
//! - **Count-bounded**: capacity is a number of tiles (a 256×256 tile is 256 KiB)
//! - **Key-indexed**: style, zoom, column and row
//! - **Negative entries**: tiles that arrived but could not be decoded are kept
//!   so rasterizing can report them instead of silently leaving a gap. They do
//!   not count as present, so the next load of their view fetches them again

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::math::TileKey;
use crate::config::DEFAULT_TILE_CACHE_CAPACITY;

/// What is known about a fetched tile.
#[derive(Debug, Clone)]
pub enum CachedTile {
    /// Decoded pixels, ready to draw.
    Decoded(Arc<tiny_skia::Pixmap>),
    /// The response arrived but its pixels cannot be read.
    Unreadable(String),
}

/// LRU cache mapping tile keys to tiles.
pub struct TileCache {
    cache: LruCache<TileKey, CachedTile>,
}

impl TileCache {
    /// Creates a cache holding up to `capacity` tiles.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(DEFAULT_TILE_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Stores a tile, evicting the least recently used one when full.
    pub fn insert(&mut self, key: TileKey, tile: CachedTile) {
        if let Some((evicted, _)) = self.cache.push(key, tile) {
            if evicted != key {
                tracing::trace!(?evicted, "tile evicted");
            }
        }
    }

    /// Looks a tile up, marking it recently used.
    pub fn get(&mut self, key: &TileKey) -> Option<CachedTile> {
        self.cache.get(key).cloned()
    }

    /// Whether decoded pixels are cached for `key`. Does not touch LRU order.
    #[must_use]
    pub fn has_pixels(&self, key: &TileKey) -> bool {
        matches!(self.cache.peek(key), Some(CachedTile::Decoded(_)))
    }

    /// Drops whatever is cached for `key`.
    pub fn forget(&mut self, key: &TileKey) {
        self.cache.pop(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
