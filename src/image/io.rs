//! Loading and saving grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{PixelGrid, RgbGrid};
use crate::util::{GrayPlaneError, GrayPlaneResult};
use std::path::Path;

/// Creates an RGB grid from a decoded 8-bit RGB buffer.
pub fn rgb_from_rgb_image(img: &image::RgbImage) -> GrayPlaneResult<RgbGrid> {
    RgbGrid::from_fn(img.width() as usize, img.height() as usize, |x, y| {
        img.get_pixel(x as u32, y as u32).0
    })
}

/// Creates an RGB grid from any decoded image, dropping alpha.
pub fn rgb_from_dynamic_image(img: &image::DynamicImage) -> GrayPlaneResult<RgbGrid> {
    let rgb = img.to_rgb8();
    rgb_from_rgb_image(&rgb)
}

/// Loads an image from disk as an RGB grid.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> GrayPlaneResult<RgbGrid> {
    let img = image::open(path).map_err(|err| GrayPlaneError::ImageIo {
        reason: err.to_string(),
    })?;
    rgb_from_dynamic_image(&img)
}

/// Converts a grid into an `image::GrayImage` for display or encoding.
pub fn gray_image_from_grid(grid: &PixelGrid) -> GrayPlaneResult<image::GrayImage> {
    let width = u32::try_from(grid.width()).map_err(|_| GrayPlaneError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    })?;
    let height = u32::try_from(grid.height()).map_err(|_| GrayPlaneError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    })?;
    Ok(image::GrayImage::from_fn(width, height, |x, y| {
        image::Luma([grid.at(x as usize, y as usize)])
    }))
}

/// Saves a grid to disk; the format follows the path extension.
pub fn save_gray_image<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> GrayPlaneResult<()> {
    gray_image_from_grid(grid)?
        .save(path)
        .map_err(|err| GrayPlaneError::ImageIo {
            reason: err.to_string(),
        })
}
