// SPDX-License-Identifier: MPL-2.0
//! PNG encoding of sampled frames using the `image` crate.

use std::io::Cursor;

use image_rs::{ImageBuffer, ImageFormat, Rgba};

use crate::domain::error::CaptureError;
use crate::domain::snapshot::{CapturedImage, RasterFrame};

/// Encodes `frame` as PNG.
///
/// # Errors
///
/// Returns [`CaptureError::CaptureFailure`] for an empty frame or if encoding fails.
pub fn encode_png(frame: &RasterFrame) -> Result<CapturedImage, CaptureError> {
    if frame.is_empty() {
        return Err(CaptureError::CaptureFailure(
            "render target has no pixels".to_string(),
        ));
    }

    let buffer: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(frame.width(), frame.height(), frame.rgba_bytes().to_vec())
            .ok_or_else(|| {
                CaptureError::CaptureFailure("frame buffer does not match its size".to_string())
            })?;

    let mut png = Cursor::new(Vec::new());
    buffer
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| CaptureError::CaptureFailure(format!("PNG encoding failed: {e}")))?;

    Ok(CapturedImage::from_png(
        png.into_inner(),
        frame.width(),
        frame.height(),
    ))
}
