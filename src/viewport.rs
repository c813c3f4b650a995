// SPDX-License-Identifier: MPL-2.0
//! The map viewport and its render target.
//!
//! [`MapViewport`] is the only writer of the view. Each mutation builds a new
//! coherent [`ViewportState`] and pushes it to the rendering surface before
//! returning; the surface then loads tiles in the background.
//! [`RenderTarget`] is the read-only handle the capturer samples from.

use std::fmt;
use std::sync::Arc;

use crate::application::port::RenderSurface;
use crate::domain::error::CaptureError;
use crate::domain::geo::{Coordinate, TileStyle, ViewportState, ZoomLevel};
use crate::domain::snapshot::{RasterFrame, ScaleFactor};

/// Capturable view of a rendering surface.
///
/// Exposes sampling only; it cannot change what the surface shows.
#[derive(Clone)]
pub struct RenderTarget {
    surface: Arc<dyn RenderSurface>,
}

impl RenderTarget {
    /// Surface size in pixels at scale 1.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    /// Returns true once the surface is mounted and has presented a view.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_attached()
    }

    /// Returns true if the surface can report when its tiles finished loading.
    #[must_use]
    pub fn has_settle_signal(&self) -> bool {
        self.surface.has_settle_signal()
    }

    /// Resolves once the surface reports its tiles loaded.
    pub async fn settled(&self) {
        self.surface.settled().await;
    }

    /// Samples the current pixels.
    ///
    /// # Errors
    ///
    /// Propagates the surface's [`CaptureError`].
    pub async fn rasterize(&self, scale: ScaleFactor) -> Result<RasterFrame, CaptureError> {
        self.surface.rasterize(scale).await
    }
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTarget")
            .field("size", &self.size())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Owner of the map's center, zoom and style.
pub struct MapViewport {
    state: ViewportState,
    surface: Arc<dyn RenderSurface>,
}

impl MapViewport {
    /// Mounts `surface` and presents `initial` on it.
    pub fn new(surface: Arc<dyn RenderSurface>, initial: ViewportState) -> Self {
        let viewport = Self {
            state: initial,
            surface,
        };
        viewport.present();
        viewport
    }

    /// Current view.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Moves the center, keeping zoom and style.
    pub fn set_center(&mut self, center: Coordinate) {
        self.update(ViewportState {
            center,
            ..self.state
        });
    }

    /// Changes the zoom, keeping center and style.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.update(ViewportState { zoom, ..self.state });
    }

    /// Switches the tile source. Center and zoom are untouched.
    pub fn set_style(&mut self, style: TileStyle) {
        self.update(ViewportState {
            style,
            ..self.state
        });
    }

    /// Centers on a located query at the detail zoom, in one update.
    pub fn locate(&mut self, center: Coordinate) {
        self.update(ViewportState {
            center,
            zoom: ZoomLevel::detail(),
            ..self.state
        });
    }

    /// Read-only handle for capturing.
    #[must_use]
    pub fn render_target(&self) -> RenderTarget {
        RenderTarget {
            surface: Arc::clone(&self.surface),
        }
    }

    fn update(&mut self, next: ViewportState) {
        self.state = next;
        self.present();
    }

    fn present(&self) {
        tracing::debug!(
            center = %self.state.center,
            zoom = self.state.zoom.value(),
            style = %self.state.style,
            "presenting viewport"
        );
        self.surface.present(&self.state);
    }
}

impl fmt::Debug for MapViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapViewport")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
