// SPDX-License-Identifier: MPL-2.0
//! Rendering surface port definition.
//!
//! A [`RenderSurface`] is whatever actually draws the map. The viewport pushes
//! coherent [`ViewportState`]s into it and the capturer samples pixels out of
//! it; neither knows which engine sits behind the trait.
//!
//! # Design Notes
//!
//! - `present` returns as soon as the new view is accepted; tile loading
//!   continues asynchronously inside the surface
//! - Surfaces that can tell when visible tiles finished loading advertise it
//!   through [`RenderSurface::has_settle_signal`]
//! - `rasterize` samples whatever is drawn right now, loaded or not

use async_trait::async_trait;

use crate::domain::error::CaptureError;
use crate::domain::geo::ViewportState;
use crate::domain::snapshot::{RasterFrame, ScaleFactor};

/// Port for the map rendering engine.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Surface size in pixels at scale 1.
    fn size(&self) -> (u32, u32);

    /// Returns true once the surface is mounted and has presented a view.
    fn is_attached(&self) -> bool;

    /// Accepts a new view. Must not block on tile loading.
    fn present(&self, viewport: &ViewportState);

    /// Returns true if [`RenderSurface::settled`] reflects real tile loading.
    fn has_settle_signal(&self) -> bool {
        false
    }

    /// Resolves once the tiles of the last presented view have loaded.
    ///
    /// The default resolves immediately; callers check
    /// [`RenderSurface::has_settle_signal`] before relying on it.
    async fn settled(&self) {}

    /// Samples the current pixels, scaled by `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::RenderUnavailable`] if nothing was presented yet,
    /// or [`CaptureError::CaptureFailure`] if the pixels cannot be read.
    async fn rasterize(&self, scale: ScaleFactor) -> Result<RasterFrame, CaptureError>;
}
