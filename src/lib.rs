//! GrayPlane reduces images to grayscale, resamples them and codes them
//! losslessly as bit planes.
//!
//! The crate covers luma conversion, 2x box-filter downsampling,
//! neighbour-average upsampling (repeated over several levels by the
//! pipeline), distortion metrics between a grid and its
//! resampled version, and a textual bit-plane run-length codec. Plane-parallel
//! encoding is available with the `rayon` feature and image file helpers with
//! `image-io`.

pub mod analysis;
pub mod codec;
pub mod convert;
pub mod image;
pub mod pipeline;
pub mod sample;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::analysis::{analyze, average_distortion, standard_deviation, DistortionReport};
pub use crate::codec::{
    BitPlaneCodec, CompressedImage, CompressorKind, CompressorRegistry, EntropyCodec,
    ImageCompressor,
};
pub use crate::convert::to_grayscale;
pub use crate::image::{PixelFormat, PixelGrid, RgbGrid};
pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput};
pub use crate::sample::{down_sample, max_levels, up_sample};
pub use crate::util::{GrayPlaneError, GrayPlaneResult};
