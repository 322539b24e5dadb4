//! Pixel grids and their format tags.
//!
//! `PixelGrid` is an owned single-channel `u8` image addressed as
//! `samples[x][y]`. Storage is x-major: the samples of one column (fixed `x`,
//! `y` running over the height) are contiguous, which is also the row framing
//! the bit-plane codec uses. Every grid carries a `PixelFormat` tag that
//! records whether its channel is true grayscale.

use crate::util::{GrayPlaneError, GrayPlaneResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod rgb;

pub use rgb::RgbGrid;

/// Interpretation of the single channel stored in a `PixelGrid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Luma samples produced by grayscale conversion or resampling.
    Gray8,
    /// One raw channel lifted out of an RGB source without conversion.
    Rgb8,
}

/// Owned single-channel image with an explicit format tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    samples: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl PixelGrid {
    /// Creates a grayscale grid from x-major samples (`index = x * height + y`).
    pub fn new(samples: Vec<u8>, width: usize, height: usize) -> GrayPlaneResult<Self> {
        Self::with_format(samples, width, height, PixelFormat::Gray8)
    }

    /// Creates a grid with an explicit format tag.
    pub fn with_format(
        samples: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> GrayPlaneResult<Self> {
        let expected = checked_len(width, height)?;
        if samples.len() != expected {
            return Err(GrayPlaneError::BufferLengthMismatch {
                expected,
                got: samples.len(),
            });
        }
        Ok(Self {
            samples,
            width,
            height,
            format,
        })
    }

    /// Builds a grayscale grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> GrayPlaneResult<Self>
    where
        F: FnMut(usize, usize) -> u8,
    {
        let len = checked_len(width, height)?;
        let mut samples = Vec::with_capacity(len);
        for x in 0..width {
            for y in 0..height {
                samples.push(f(x, y));
            }
        }
        Self::new(samples, width, height)
    }

    /// Creates a grayscale grid filled with a single value.
    pub fn filled(width: usize, height: usize, value: u8) -> GrayPlaneResult<Self> {
        let len = checked_len(width, height)?;
        Self::new(vec![value; len], width, height)
    }

    /// Returns the grid width (extent of `x`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height (extent of `y`).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the format tag.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(x * self.height + y).copied()
    }

    /// Returns the contiguous column for a fixed `x`.
    pub fn column(&self, x: usize) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let start = x * self.height;
        self.samples.get(start..start + self.height)
    }

    /// Iterates over the columns in order of increasing `x`.
    pub fn columns(&self) -> std::slice::ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.height)
    }

    /// Returns the backing x-major slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Consumes the grid and returns its x-major samples.
    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }

    /// Counts how often each sample value occurs.
    pub fn histogram(&self) -> [u64; 256] {
        let mut bins = [0u64; 256];
        for &sample in &self.samples {
            bins[usize::from(sample)] += 1;
        }
        bins
    }

    /// Unchecked accessor for hot loops that already validated bounds.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> u8 {
        self.samples[x * self.height + y]
    }
}

pub(crate) fn checked_len(width: usize, height: usize) -> GrayPlaneResult<usize> {
    if width == 0 || height == 0 {
        return Err(GrayPlaneError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GrayPlaneError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{PixelFormat, PixelGrid};
    use crate::util::GrayPlaneError;

    #[test]
    fn new_rejects_zero_dimensions() {
        let err = PixelGrid::new(Vec::new(), 0, 3).unwrap_err();
        assert_eq!(
            err,
            GrayPlaneError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
    }

    #[test]
    fn new_rejects_wrong_buffer_length() {
        let err = PixelGrid::new(vec![0u8; 5], 2, 3).unwrap_err();
        assert_eq!(
            err,
            GrayPlaneError::BufferLengthMismatch {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn samples_are_x_major() {
        let grid = PixelGrid::new(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(0, 2), Some(3));
        assert_eq!(grid.get(1, 0), Some(4));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.column(1).unwrap(), &[4, 5, 6]);
        assert_eq!(grid.columns().count(), 2);
        assert_eq!(grid.format(), PixelFormat::Gray8);
    }

    #[test]
    fn from_fn_matches_accessor() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| (x * 10 + y) as u8).unwrap();
        assert_eq!(grid.get(2, 1), Some(21));
        assert_eq!(grid.at(1, 0), 10);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let grid = PixelGrid::new(vec![0, 0, 7, 255], 2, 2).unwrap();
        let bins = grid.histogram();
        assert_eq!(bins[0], 2);
        assert_eq!(bins[7], 1);
        assert_eq!(bins[255], 1);
        assert_eq!(bins.iter().sum::<u64>(), 4);
    }
}
