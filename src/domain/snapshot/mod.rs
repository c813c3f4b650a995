// SPDX-License-Identifier: MPL-2.0
//! Snapshot types for the domain layer.
//!
//! These types represent pure pixel and encoded-image data without any
//! rendering-engine dependencies.

pub mod newtypes;

use std::sync::Arc;

pub use newtypes::{scale_bounds, settle_bounds, ScaleFactor, SettleDelay};

/// Raw RGBA pixels sampled from a render surface.
///
/// # Example
///
/// ```
/// use map_capture::domain::snapshot::RasterFrame;
///
/// let frame = RasterFrame::from_rgba(2, 2, vec![255u8; 2 * 2 * 4]).unwrap();
/// assert_eq!(frame.width(), 2);
/// assert!(RasterFrame::from_rgba(2, 2, vec![0u8; 3]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFrame {
    width: u32,
    height: u32,
    /// Straight (non-premultiplied) RGBA, 4 bytes per pixel.
    rgba_bytes: Arc<Vec<u8>>,
}

impl RasterFrame {
    /// Creates a frame, returning `None` if the buffer length does not
    /// match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Option<Self> {
        let expected_len = (width as usize) * (height as usize) * 4;
        if rgba_bytes.len() != expected_len {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba_bytes: Arc::new(rgba_bytes),
        })
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns true if the frame has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A PNG-encoded snapshot of the map, ready to be shown or submitted.
///
/// Cheap to clone; the encoded bytes are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    png_bytes: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl CapturedImage {
    /// Encoding name of the payload.
    pub const ENCODING: &'static str = "png";

    /// Wraps PNG bytes of an image with the given dimensions.
    #[must_use]
    pub fn from_png(png_bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            png_bytes: Arc::new(png_bytes),
            width,
            height,
        }
    }

    /// Encoded bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.png_bytes
    }

    /// Always `"png"`.
    #[must_use]
    pub fn encoding(&self) -> &'static str {
        Self::ENCODING
    }

    /// MIME type of the payload.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.png_bytes.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.png_bytes.is_empty()
    }

    /// Returns true if both images share the same encoded buffer.
    #[must_use]
    pub fn shares_data_with(&self, other: &CapturedImage) -> bool {
        Arc::ptr_eq(&self.png_bytes, &other.png_bytes)
    }
}
