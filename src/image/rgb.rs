//! Decoded color sources.

use crate::image::{checked_len, PixelFormat, PixelGrid};
use crate::util::{GrayPlaneError, GrayPlaneResult};

/// Owned RGB image, three 8-bit channels per pixel, stored x-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbGrid {
    pixels: Vec<[u8; 3]>,
    width: usize,
    height: usize,
}

impl RgbGrid {
    /// Creates an RGB grid from x-major pixels (`index = x * height + y`).
    pub fn new(pixels: Vec<[u8; 3]>, width: usize, height: usize) -> GrayPlaneResult<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(GrayPlaneError::BufferLengthMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Builds an RGB grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> GrayPlaneResult<Self>
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let len = checked_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for x in 0..width {
            for y in 0..height {
                pixels.push(f(x, y));
            }
        }
        Self::new(pixels, width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the `[r, g, b]` triple at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(x * self.height + y).copied()
    }

    /// Returns the backing x-major pixels.
    pub fn as_slice(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Extracts one raw channel (0 = red, 1 = green, 2 = blue).
    ///
    /// The result is tagged `PixelFormat::Rgb8`: it is a color component, not
    /// luma, and grayscale-only stages refuse it.
    pub fn channel(&self, index: usize) -> GrayPlaneResult<PixelGrid> {
        if index >= 3 {
            return Err(GrayPlaneError::ChannelOutOfRange { index });
        }
        let samples = self.pixels.iter().map(|px| px[index]).collect();
        PixelGrid::with_format(samples, self.width, self.height, PixelFormat::Rgb8)
    }
}

#[cfg(test)]
mod tests {
    use super::RgbGrid;
    use crate::image::PixelFormat;
    use crate::util::GrayPlaneError;

    #[test]
    fn channel_is_tagged_as_color() {
        let rgb = RgbGrid::from_fn(2, 2, |x, y| [x as u8, y as u8, 9]).unwrap();
        let green = rgb.channel(1).unwrap();
        assert_eq!(green.format(), PixelFormat::Rgb8);
        assert_eq!(green.get(0, 1), Some(1));
        assert_eq!(green.get(1, 0), Some(0));
    }

    #[test]
    fn channel_rejects_out_of_range_index() {
        let rgb = RgbGrid::new(vec![[0, 0, 0]], 1, 1).unwrap();
        assert_eq!(
            rgb.channel(3).unwrap_err(),
            GrayPlaneError::ChannelOutOfRange { index: 3 }
        );
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = RgbGrid::new(vec![[1, 2, 3]; 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            GrayPlaneError::BufferLengthMismatch {
                expected: 4,
                got: 3
            }
        );
    }
}
