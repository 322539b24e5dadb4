//! Error types for grayplane.

use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for grayplane operations.
pub type GrayPlaneResult<T> = std::result::Result<T, GrayPlaneError>;

/// Errors that can occur when transforming, measuring or coding grids.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrayPlaneError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The sample buffer does not hold exactly `width * height` entries.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// A color channel index outside `0..3` was requested.
    #[error("channel index {index} out of range for an RGB source")]
    ChannelOutOfRange { index: usize },
    /// The grid carries a pixel format the operation does not accept.
    #[error("incompatible pixel format: expected {expected:?}, found {found:?}")]
    Format {
        expected: PixelFormat,
        found: PixelFormat,
    },
    /// Two grids that must share a shape do not.
    #[error("dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A resampling depth of zero, or deeper than the grid can be halved.
    #[error("invalid resampling depth {requested}: grid allows 1..={max}")]
    InvalidLevels { requested: usize, max: usize },
    /// A compressed stream cannot be decoded.
    #[error("malformed stream at row {row}: {reason}")]
    MalformedStream { row: usize, reason: String },
    /// The selected feature exists in the interface but has no implementation.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    /// A decoded grid differs from the grid that was encoded.
    #[error("round trip mismatch at ({x}, {y})")]
    RoundTripMismatch { x: usize, y: usize },
    /// Reading or writing a container failed.
    #[error("i/o error: {reason}")]
    Io { reason: String },
    /// Image decoding or encoding failed.
    #[error("image i/o error: {reason}")]
    ImageIo { reason: String },
}

impl GrayPlaneError {
    pub(crate) fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedStream {
            row,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for GrayPlaneError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
