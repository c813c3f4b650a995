// SPDX-License-Identifier: MPL-2.0
//! Slippy-map rendering surface.
//!
//! [`TileSurface`] keeps the presented view, fetches the tiles covering it in
//! the background and composites them on demand:
//!
//! - `present` records the view and, when called inside a tokio runtime,
//!   spawns a loader for the tiles without cached pixels. Tiles that were
//!   unreadable last time are fetched again.
//! - Each loader publishes its generation on a `watch` channel once its tiles
//!   are in; `settled` waits for the generation of the latest view.
//! - `rasterize` draws the cached tiles onto a `tiny-skia` pixmap at the
//!   requested scale. Tiles that failed to download leave the background
//!   showing; tiles whose bytes are not an image fail the capture.

mod cache;
pub mod math;

pub use cache::{CachedTile, TileCache};
pub use math::{TileKey, TilePlacement, TILE_SIZE};

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::watch;

use crate::application::port::RenderSurface;
use crate::config::TilesConfig;
use crate::domain::error::CaptureError;
use crate::domain::geo::ViewportState;
use crate::domain::snapshot::{RasterFrame, ScaleFactor};
use crate::error::{Error, Result};

/// Shown where no tile has been drawn.
const BACKGROUND: [u8; 4] = [0xdd, 0xdd, 0xdd, 0xff];

struct Inner {
    client: reqwest::Client,
    config: TilesConfig,
    size: (u32, u32),
    view: Mutex<Option<ViewportState>>,
    cache: Mutex<TileCache>,
    /// Generation of the latest presented view.
    presented: AtomicU64,
    /// Latest generation handed to a background loader.
    spawned: AtomicU64,
    /// Latest generation whose tiles finished loading.
    loaded: watch::Sender<u64>,
}

impl Inner {
    fn view(&self) -> Option<ViewportState> {
        *lock(&self.view)
    }

    async fn load(self: Arc<Self>, view: ViewportState, generation: u64) {
        let missing: Vec<TileKey> = {
            let cache = lock(&self.cache);
            let mut seen = HashSet::new();
            math::visible_tiles(&view, self.size.0, self.size.1)
                .into_iter()
                .map(|placement| placement.key)
                .filter(|key| !cache.has_pixels(key) && seen.insert(*key))
                .collect()
        };

        let requested = missing.len();
        let fetched = join_all(missing.into_iter().map(|key| self.fetch(key))).await;

        let mut stored = 0;
        {
            let mut cache = lock(&self.cache);
            for (key, tile) in fetched {
                match tile {
                    Some(tile) => {
                        cache.insert(key, tile);
                        stored += 1;
                    }
                    // A failed download shows as a gap, not as an earlier unreadable copy.
                    None => cache.forget(&key),
                }
            }
        }

        self.loaded.send_modify(|loaded| {
            if generation > *loaded {
                *loaded = generation;
            }
        });
        tracing::debug!(generation, requested, stored, "tiles loaded");
    }

    async fn fetch(&self, key: TileKey) -> (TileKey, Option<CachedTile>) {
        (key, self.download(key).await)
    }

    async fn download(&self, key: TileKey) -> Option<CachedTile> {
        let url = math::expand_template(self.config.template(key.style), &key);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, %err, "tile request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(%url, status = %response.status(), "tile request rejected");
            return None;
        }
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%url, %err, "tile body incomplete");
                return None;
            }
        };

        let tile = match decode_tile(&bytes) {
            Ok(pixmap) => CachedTile::Decoded(Arc::new(pixmap)),
            Err(reason) => {
                tracing::warn!(%url, %reason, "tile is not a readable image");
                CachedTile::Unreadable(reason)
            }
        };
        Some(tile)
    }
}

/// [`RenderSurface`] drawing web map tiles.
#[derive(Clone)]
pub struct TileSurface {
    inner: Arc<Inner>,
}

impl TileSurface {
    /// Builds a surface from the `[tiles]` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &TilesConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Http(format!("Failed to create tile client: {e}")))?;

        let (loaded, _) = watch::channel(0);

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                config: config.clone(),
                size: config.surface_size(),
                view: Mutex::new(None),
                cache: Mutex::new(TileCache::new(config.cache_capacity())),
                presented: AtomicU64::new(0),
                spawned: AtomicU64::new(0),
                loaded,
            }),
        })
    }

    #[cfg(test)]
    fn insert_tile(&self, key: TileKey, tile: CachedTile) {
        lock(&self.inner.cache).insert(key, tile);
    }
}

#[async_trait]
impl RenderSurface for TileSurface {
    fn size(&self) -> (u32, u32) {
        self.inner.size
    }

    fn is_attached(&self) -> bool {
        self.inner.view().is_some()
    }

    fn present(&self, view: &ViewportState) {
        let generation = self.inner.presented.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.inner.view) = Some(*view);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                self.inner.spawned.store(generation, Ordering::SeqCst);
                handle.spawn(Arc::clone(&self.inner).load(*view, generation));
            }
            Err(_) => {
                tracing::debug!(generation, "no runtime, tiles load on first settle");
            }
        }
    }

    fn has_settle_signal(&self) -> bool {
        true
    }

    async fn settled(&self) {
        let target = self.inner.presented.load(Ordering::SeqCst);

        if self.inner.spawned.load(Ordering::SeqCst) < target {
            if let Some(view) = self.inner.view() {
                Arc::clone(&self.inner).load(view, target).await;
            }
            return;
        }

        let mut loaded = self.inner.loaded.subscribe();
        // The sender lives as long as `self`, so this only ends by matching.
        let _ = loaded.wait_for(|generation| *generation >= target).await;
    }

    async fn rasterize(&self, scale: ScaleFactor) -> std::result::Result<RasterFrame, CaptureError> {
        let view = self.inner.view().ok_or(CaptureError::RenderUnavailable)?;
        let (width, height) = self.inner.size;
        let (scaled_width, scaled_height) = (scale.apply(width), scale.apply(height));

        let mut pixmap = tiny_skia::Pixmap::new(scaled_width, scaled_height).ok_or_else(|| {
            CaptureError::CaptureFailure(format!(
                "cannot allocate a {scaled_width}x{scaled_height} canvas"
            ))
        })?;
        let [r, g, b, a] = BACKGROUND;
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        #[allow(clippy::cast_precision_loss)]
        let factor = scale.value() as f32;
        let transform = tiny_skia::Transform::from_scale(factor, factor);
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..tiny_skia::PixmapPaint::default()
        };

        let mut missing = 0usize;
        {
            let mut cache = lock(&self.inner.cache);
            for placement in math::visible_tiles(&view, width, height) {
                match cache.get(&placement.key) {
                    Some(CachedTile::Decoded(tile)) => pixmap.draw_pixmap(
                        placement.offset_x,
                        placement.offset_y,
                        tiny_skia::Pixmap::as_ref(&tile),
                        &paint,
                        transform,
                        None,
                    ),
                    Some(CachedTile::Unreadable(reason)) => {
                        let TileKey { z, x, y, .. } = placement.key;
                        return Err(CaptureError::CaptureFailure(format!(
                            "tile {z}/{y}/{x} cannot be read: {reason}"
                        )));
                    }
                    None => missing += 1,
                }
            }
        }
        if missing > 0 {
            tracing::debug!(missing, "rasterizing with tiles still missing");
        }

        let rgba: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();

        RasterFrame::from_rgba(scaled_width, scaled_height, rgba).ok_or_else(|| {
            CaptureError::CaptureFailure("canvas size does not match its pixels".to_string())
        })
    }
}

impl std::fmt::Debug for TileSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileSurface")
            .field("size", &self.inner.size)
            .field("view", &self.inner.view())
            .field("presented", &self.inner.presented.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Decodes tile bytes (PNG or JPEG) into a premultiplied pixmap.
///
/// # Errors
///
/// Returns a description of the problem if the bytes are not a decodable image.
pub fn decode_tile(bytes: &[u8]) -> std::result::Result<tiny_skia::Pixmap, String> {
    let image = image_rs::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();

    let mut pixmap = tiny_skia::Pixmap::new(rgba.width(), rgba.height())
        .ok_or_else(|| "tile has no pixels".to_string())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
