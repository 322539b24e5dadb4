//! Distortion metrics between an original grid and its resampled version.
//!
//! Both metrics use the reference arithmetic bit for bit. The average is a
//! truncated mean of absolute differences taken through a single-precision
//! float. The deviation accumulates `|((o ^ 2) - (m ^ 2)) ^ 2|` with `^` as
//! bitwise XOR, integer-divides by the pixel count, then takes the square
//! root. It is not a statistical standard deviation.

use crate::image::PixelGrid;
use crate::trace::{trace_event, trace_span};
use crate::util::math::{float_trunc_div, xor_deviation_term};
use crate::util::{GrayPlaneError, GrayPlaneResult};

/// Both distortion metrics for one pair of grids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistortionReport {
    /// Truncated mean absolute difference.
    pub average_distortion: u64,
    /// Square root of the truncated mean XOR term.
    pub standard_deviation: f64,
}

/// Computes the truncated mean absolute difference between two grids.
pub fn average_distortion(original: &PixelGrid, modified: &PixelGrid) -> GrayPlaneResult<u64> {
    ensure_same_shape(original, modified)?;
    let total: u64 = original
        .as_slice()
        .iter()
        .zip(modified.as_slice())
        .map(|(&o, &m)| u64::from(o.abs_diff(m)))
        .sum();
    Ok(float_trunc_div(total, pixel_count(original)))
}

/// Computes the XOR-based deviation metric between two grids.
pub fn standard_deviation(original: &PixelGrid, modified: &PixelGrid) -> GrayPlaneResult<f64> {
    ensure_same_shape(original, modified)?;
    let total: i64 = original
        .as_slice()
        .iter()
        .zip(modified.as_slice())
        .map(|(&o, &m)| xor_deviation_term(o, m))
        .sum();
    let mean = total / pixel_count(original) as i64;
    Ok((mean as f64).sqrt())
}

/// Computes both metrics.
pub fn analyze(original: &PixelGrid, modified: &PixelGrid) -> GrayPlaneResult<DistortionReport> {
    let _stage = trace_span!(
        "distortion",
        width = original.width(),
        height = original.height()
    );
    let report = DistortionReport {
        average_distortion: average_distortion(original, modified)?,
        standard_deviation: standard_deviation(original, modified)?,
    };
    trace_event!(
        "distortion_done",
        average = report.average_distortion,
        deviation = report.standard_deviation
    );
    Ok(report)
}

fn ensure_same_shape(original: &PixelGrid, modified: &PixelGrid) -> GrayPlaneResult<()> {
    if original.dimensions() != modified.dimensions() {
        return Err(GrayPlaneError::DimensionMismatch {
            left: original.dimensions(),
            right: modified.dimensions(),
        });
    }
    Ok(())
}

fn pixel_count(grid: &PixelGrid) -> u64 {
    (grid.width() * grid.height()) as u64
}
