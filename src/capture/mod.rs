// SPDX-License-Identifier: MPL-2.0
//! Snapshot capture of the rendered viewport.
//!
//! Capturing is three steps:
//!
//! 1. **Settle**: wait for tile loading. When the surface exposes a
//!    tiles-loaded signal and `wait_for_tiles` is on, wait on it with the
//!    settle delay as timeout; otherwise sleep the settle delay. Either way
//!    this is a heuristic, and slow tile sources can still show gaps.
//! 2. **Rasterize**: sample the surface at the configured scale (2× by default).
//! 3. **Encode**: PNG.

mod encode;

pub use encode::encode_png;

use crate::config::CaptureConfig;
use crate::domain::error::CaptureError;
use crate::domain::snapshot::{CapturedImage, ScaleFactor, SettleDelay};
use crate::viewport::RenderTarget;

/// Capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Wait applied before sampling.
    pub settle_delay: SettleDelay,
    /// Resolution multiplier.
    pub scale: ScaleFactor,
    /// Prefer the surface's tiles-loaded signal when it has one.
    pub wait_for_tiles: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            settle_delay: SettleDelay::default(),
            scale: ScaleFactor::default(),
            wait_for_tiles: true,
        }
    }
}

impl From<&CaptureConfig> for CaptureSettings {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            settle_delay: config.settle_delay(),
            scale: config.scale(),
            wait_for_tiles: config.wait_for_tiles,
        }
    }
}

/// Turns a render target into a [`CapturedImage`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotCapturer {
    settings: CaptureSettings,
}

impl SnapshotCapturer {
    #[must_use]
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> CaptureSettings {
        self.settings
    }

    /// Settles, rasterizes and encodes the target.
    ///
    /// Repeated captures of an unchanged view are not guaranteed to be
    /// byte-identical.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::RenderUnavailable`] if the target is not attached
    /// when the capture starts, or any error raised while sampling or encoding.
    pub async fn capture(&self, target: &RenderTarget) -> Result<CapturedImage, CaptureError> {
        if !target.is_attached() {
            return Err(CaptureError::RenderUnavailable);
        }

        self.settle(target).await;

        let frame = target.rasterize(self.settings.scale).await?;
        let image = encode_png(&frame)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            bytes = image.len(),
            "captured viewport"
        );
        Ok(image)
    }

    async fn settle(&self, target: &RenderTarget) {
        let delay = self.settings.settle_delay.as_duration();

        if self.settings.wait_for_tiles && target.has_settle_signal() {
            if tokio::time::timeout(delay, target.settled()).await.is_err() {
                tracing::warn!(
                    delay_ms = self.settings.settle_delay.as_millis(),
                    "tiles still loading after settle delay, capturing anyway"
                );
            }
        } else {
            tokio::time::sleep(delay).await;
        }
    }
}
