//! Entropy-coding codec placeholder.
//!
//! The kind is part of the closed codec set so callers can name it, but both
//! directions fail with `NotImplemented` instead of falling back to another
//! codec.

use crate::codec::{CompressedImage, CompressorKind, ImageCompressor};
use crate::image::PixelGrid;
use crate::util::{GrayPlaneError, GrayPlaneResult};

/// Reserved entropy codec; every operation reports `NotImplemented`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntropyCodec;

impl ImageCompressor for EntropyCodec {
    fn kind(&self) -> CompressorKind {
        CompressorKind::EntropyCoding
    }

    fn compress(&self, _grid: &PixelGrid) -> GrayPlaneResult<CompressedImage> {
        // TODO: build a Huffman table from `PixelGrid::histogram` and emit codes.
        Err(GrayPlaneError::NotImplemented("entropy coding compression"))
    }

    fn decompress(&self, _image: &CompressedImage) -> GrayPlaneResult<PixelGrid> {
        Err(GrayPlaneError::NotImplemented("entropy coding decompression"))
    }
}
