// SPDX-License-Identifier: MPL-2.0
//! Capture newtypes.

use std::time::Duration;

// =============================================================================
// Scale Bounds
// =============================================================================

/// Rasterization scale bounds.
pub mod scale_bounds {
    /// Minimum scale factor (surface resolution).
    pub const MIN: u32 = 1;
    /// Maximum scale factor.
    pub const MAX: u32 = 4;
    /// Default scale factor.
    pub const DEFAULT: u32 = 2;
}

// =============================================================================
// ScaleFactor
// =============================================================================

/// Integer resolution multiplier applied when rasterizing a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor(u32);

impl ScaleFactor {
    /// Creates a new scale factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(scale_bounds::MIN, scale_bounds::MAX))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Scales a pixel dimension.
    #[must_use]
    pub fn apply(self, pixels: u32) -> u32 {
        pixels.saturating_mul(self.0)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

// =============================================================================
// Settle Bounds
// =============================================================================

/// Settle delay bounds, in milliseconds.
pub mod settle_bounds {
    /// Minimum delay (no wait).
    pub const MIN_MS: u64 = 0;
    /// Maximum delay.
    pub const MAX_MS: u64 = 10_000;
    /// Default delay.
    pub const DEFAULT_MS: u64 = 1_000;
}

// =============================================================================
// SettleDelay
// =============================================================================

/// Wait applied before sampling a surface so asynchronous tile loading can
/// finish. Best effort: slow tile sources may still be mid-load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelay(u64);

impl SettleDelay {
    /// Creates a new delay, clamping the value to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(settle_bounds::MIN_MS, settle_bounds::MAX_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for SettleDelay {
    fn default() -> Self {
        Self(settle_bounds::DEFAULT_MS)
    }
}
