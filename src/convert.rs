//! RGB to grayscale conversion.
//!
//! Luma uses the weights `0.30 R + 0.59 G + 0.11 B` and truncates toward zero.

use crate::image::{PixelGrid, RgbGrid};
use crate::trace::{trace_event, trace_span};
use crate::util::math::luma;
use crate::util::GrayPlaneResult;

/// Converts an RGB grid to a `Gray8` grid of the same size.
pub fn to_grayscale(rgb: &RgbGrid) -> GrayPlaneResult<PixelGrid> {
    let _stage = trace_span!("grayscale", width = rgb.width(), height = rgb.height());
    let samples = rgb
        .as_slice()
        .iter()
        .map(|&[r, g, b]| luma(r, g, b))
        .collect();
    let gray = PixelGrid::new(samples, rgb.width(), rgb.height())?;
    trace_event!("grayscale_done", pixels = gray.as_slice().len());
    Ok(gray)
}
