//! Lossless grid codecs and codec selection.
//!
//! `ImageCompressor` is the seam every codec implements. `CompressorRegistry`
//! maps the closed set of `CompressorKind`s to implementations; it is an
//! ordinary value built by the caller and passed to whoever needs it.

use crate::image::PixelGrid;
use crate::util::{GrayPlaneError, GrayPlaneResult};

pub mod bitplane;
mod container;
pub mod entropy;

pub use bitplane::BitPlaneCodec;
pub use entropy::EntropyCodec;

/// Textual compressed form of a grid plus the dimensions needed to decode it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressedImage {
    width: usize,
    height: usize,
    encoding: String,
}

impl CompressedImage {
    /// Wraps an encoding produced elsewhere (for example read from storage).
    pub fn new(width: usize, height: usize, encoding: String) -> Self {
        Self {
            width,
            height,
            encoding,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the encoded stream.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Consumes the image and returns the encoded stream.
    pub fn into_encoding(self) -> String {
        self.encoding
    }

    /// Size of the encoded stream in bytes.
    pub fn encoded_len(&self) -> usize {
        self.encoding.len()
    }

    /// Raw grid bytes divided by encoded bytes; below 1.0 the encoding is larger.
    pub fn compression_ratio(&self) -> f64 {
        if self.encoding.is_empty() {
            return 0.0;
        }
        self.width as f64 * self.height as f64 / self.encoding.len() as f64
    }
}

/// Identifiers of the available codecs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompressorKind {
    /// Bit-plane run-length coding.
    BitPlaneRle,
    /// Histogram-driven entropy coding; reserved, not implemented.
    EntropyCoding,
}

impl CompressorKind {
    /// Every kind, in declaration order.
    pub const ALL: [CompressorKind; 2] = [CompressorKind::BitPlaneRle, CompressorKind::EntropyCoding];

    /// Whether the codec behind this kind produces usable output.
    pub fn is_functional(self) -> bool {
        matches!(self, CompressorKind::BitPlaneRle)
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CompressorKind::BitPlaneRle => "bit_plane_rle",
            CompressorKind::EntropyCoding => "entropy_coding",
        }
    }
}

/// A codec that turns grids into `CompressedImage`s and back.
pub trait ImageCompressor: Send + Sync {
    /// The kind this codec is registered under.
    fn kind(&self) -> CompressorKind;

    /// Encodes a grid.
    fn compress(&self, grid: &PixelGrid) -> GrayPlaneResult<CompressedImage>;

    /// Decodes a compressed image into a `Gray8` grid.
    fn decompress(&self, image: &CompressedImage) -> GrayPlaneResult<PixelGrid>;
}

/// Lookup table from `CompressorKind` to codec implementation.
#[derive(Clone, Debug, Default)]
pub struct CompressorRegistry {
    bit_plane: BitPlaneCodec,
    entropy: EntropyCodec,
}

impl CompressorRegistry {
    /// Creates a registry with default codec settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the bit-plane codec (e.g. to enable parallel encoding).
    pub fn with_bit_plane(mut self, codec: BitPlaneCodec) -> Self {
        self.bit_plane = codec;
        self
    }

    /// Returns the codec registered for `kind`, functional or not.
    pub fn get(&self, kind: CompressorKind) -> &dyn ImageCompressor {
        match kind {
            CompressorKind::BitPlaneRle => &self.bit_plane,
            CompressorKind::EntropyCoding => &self.entropy,
        }
    }

    /// Returns the codec for `kind`, refusing kinds without an implementation.
    pub fn select(&self, kind: CompressorKind) -> GrayPlaneResult<&dyn ImageCompressor> {
        if !kind.is_functional() {
            return Err(GrayPlaneError::NotImplemented(kind.name()));
        }
        Ok(self.get(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::{CompressedImage, CompressorKind, CompressorRegistry};
    use crate::util::GrayPlaneError;

    #[test]
    fn registry_maps_every_kind_to_matching_codec() {
        let registry = CompressorRegistry::new();
        for kind in CompressorKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
        }
    }

    #[test]
    fn select_refuses_entropy_coding() {
        let registry = CompressorRegistry::new();
        assert!(registry.select(CompressorKind::BitPlaneRle).is_ok());
        assert_eq!(
            registry.select(CompressorKind::EntropyCoding).err().unwrap(),
            GrayPlaneError::NotImplemented("entropy_coding")
        );
    }

    #[test]
    fn compression_ratio_compares_raw_and_encoded_bytes() {
        let image = CompressedImage::new(4, 4, "x".repeat(8));
        assert!((image.compression_ratio() - 2.0).abs() < 1e-12);
        assert_eq!(image.encoded_len(), 8);
        assert_eq!(CompressedImage::new(1, 1, String::new()).compression_ratio(), 0.0);
    }

    #[test]
    fn compression_ratio_handles_unrepresentable_pixel_counts() {
        let image = CompressedImage::new(usize::MAX, 2, "x".to_owned());
        let ratio = image.compression_ratio();
        assert!(ratio.is_finite());
        assert!(ratio > usize::MAX as f64);
    }
}
