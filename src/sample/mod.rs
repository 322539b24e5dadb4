//! Resolution halving and doubling for grayscale grids.
//!
//! Downsampling is a 2x2 box filter with truncating division:
//! `dst = (a + b + c + d) / 4`. A trailing odd column or row has no partner
//! and is dropped.
//!
//! Upsampling maps each destination pixel to its source pixel `(i/2, j/2)`
//! and averages it with the right, lower-right and lower neighbours that
//! exist. The lower-right neighbour only counts when the right one does, so
//! the last column and row average fewer samples than the interior.

use crate::image::{PixelFormat, PixelGrid};
use crate::trace::{trace_event, trace_span};
use crate::util::math::float_trunc_div;
use crate::util::{GrayPlaneError, GrayPlaneResult};

/// Halves both dimensions of a `Gray8` grid.
pub fn down_sample(grid: &PixelGrid) -> GrayPlaneResult<PixelGrid> {
    if grid.format() != PixelFormat::Gray8 {
        return Err(GrayPlaneError::Format {
            expected: PixelFormat::Gray8,
            found: grid.format(),
        });
    }
    let _stage = trace_span!("down_sample", width = grid.width(), height = grid.height());

    let dst_width = grid.width() / 2;
    let dst_height = grid.height() / 2;
    let out = PixelGrid::from_fn(dst_width, dst_height, |x, y| {
        let (sx, sy) = (2 * x, 2 * y);
        let sum = u16::from(grid.at(sx, sy))
            + u16::from(grid.at(sx, sy + 1))
            + u16::from(grid.at(sx + 1, sy))
            + u16::from(grid.at(sx + 1, sy + 1));
        (sum / 4) as u8
    })?;

    trace_event!("down_sample_done", width = out.width(), height = out.height());
    Ok(out)
}

/// Number of times a `width x height` grid can be halved before a side
/// reaches zero.
pub fn max_levels(width: usize, height: usize) -> usize {
    match (width, height) {
        (0, _) | (_, 0) => 0,
        (w, h) => w.min(h).ilog2() as usize,
    }
}

/// Doubles both dimensions of a grid using neighbour averaging.
pub fn up_sample(grid: &PixelGrid) -> GrayPlaneResult<PixelGrid> {
    let _stage = trace_span!("up_sample", width = grid.width(), height = grid.height());

    let src_width = grid.width();
    let src_height = grid.height();
    let dst_width = src_width
        .checked_mul(2)
        .ok_or(GrayPlaneError::InvalidDimensions {
            width: src_width,
            height: src_height,
        })?;
    let dst_height = src_height
        .checked_mul(2)
        .ok_or(GrayPlaneError::InvalidDimensions {
            width: src_width,
            height: src_height,
        })?;

    let out = PixelGrid::from_fn(dst_width, dst_height, |i, j| {
        let (sx, sy) = (i / 2, j / 2);
        let has_right = sx + 1 < src_width;
        let has_below = sy + 1 < src_height;

        let mut total = u64::from(grid.at(sx, sy));
        let mut count = 1u64;
        if has_right {
            total += u64::from(grid.at(sx + 1, sy));
            count += 1;
            if has_below {
                total += u64::from(grid.at(sx + 1, sy + 1));
                count += 1;
            }
        }
        if has_below {
            total += u64::from(grid.at(sx, sy + 1));
            count += 1;
        }
        float_trunc_div(total, count) as u8
    })?;

    trace_event!("up_sample_done", width = out.width(), height = out.height());
    Ok(out)
}
