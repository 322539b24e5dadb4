//! End-to-end processing: gray, halve, double, measure, compress.

use crate::analysis::{analyze, DistortionReport};
use crate::codec::{CompressedImage, CompressorKind, CompressorRegistry, ImageCompressor};
use crate::convert::to_grayscale;
use crate::image::{PixelGrid, RgbGrid};
use crate::sample::{down_sample, max_levels, up_sample};
use crate::trace::{trace_event, trace_span};
use crate::util::{GrayPlaneError, GrayPlaneResult};

/// Pipeline configuration.
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Codec used for the compression stage.
    pub codec: CompressorKind,
    /// Decode the compressed stream again and compare it with the gray grid.
    pub verify_round_trip: bool,
    /// How many times the grid is halved before being doubled back.
    pub levels: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            codec: CompressorKind::BitPlaneRle,
            verify_round_trip: true,
            levels: 1,
        }
    }
}

/// Every intermediate product of one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub gray: PixelGrid,
    /// One grid per halving, largest first.
    pub down_levels: Vec<PixelGrid>,
    /// One grid per doubling, smallest first; the last one matches `gray`.
    pub up_levels: Vec<PixelGrid>,
    pub report: DistortionReport,
    pub compressed: CompressedImage,
    /// Decoded grid, present when round-trip verification ran.
    pub restored: Option<PixelGrid>,
}

impl PipelineOutput {
    /// Smallest grid reached by halving.
    pub fn downsampled(&self) -> &PixelGrid {
        self.down_levels.last().unwrap_or(&self.gray)
    }

    /// Grid restored to full size by doubling; this is what `report` measures.
    pub fn upsampled(&self) -> &PixelGrid {
        self.up_levels.last().unwrap_or(&self.gray)
    }
}

/// Runs the full transform and compression chain with a fixed registry.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    registry: CompressorRegistry,
    cfg: PipelineConfig,
}

impl Pipeline {
    pub fn new(registry: CompressorRegistry) -> Self {
        Self {
            registry,
            cfg: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: PipelineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Runs the pipeline on a color source.
    pub fn run(&self, rgb: &RgbGrid) -> GrayPlaneResult<PipelineOutput> {
        let gray = to_grayscale(rgb)?;
        self.run_gray(gray)
    }

    /// Runs the pipeline on an already-gray grid.
    pub fn run_gray(&self, gray: PixelGrid) -> GrayPlaneResult<PipelineOutput> {
        let _stage = trace_span!(
            "pipeline",
            width = gray.width(),
            height = gray.height(),
            levels = self.cfg.levels
        );
        let codec = self.registry.select(self.cfg.codec)?;

        let max = max_levels(gray.width(), gray.height());
        if self.cfg.levels == 0 || self.cfg.levels > max {
            return Err(GrayPlaneError::InvalidLevels {
                requested: self.cfg.levels,
                max,
            });
        }

        let down_levels = resample_chain(&gray, self.cfg.levels, down_sample)?;
        let smallest = down_levels.last().unwrap_or(&gray);
        let up_levels = resample_chain(smallest, self.cfg.levels, up_sample)?;
        let upsampled = up_levels.last().unwrap_or(smallest);
        // An odd side at any level comes back short and fails the shape check.
        let report = analyze(&gray, upsampled)?;
        let compressed = codec.compress(&gray)?;

        let restored = if self.cfg.verify_round_trip {
            let restored = codec.decompress(&compressed)?;
            if let Some((x, y)) = first_difference(&gray, &restored) {
                return Err(GrayPlaneError::RoundTripMismatch { x, y });
            }
            Some(restored)
        } else {
            None
        };

        trace_event!(
            "pipeline_done",
            average_distortion = report.average_distortion,
            encoded_bytes = compressed.encoded_len()
        );
        Ok(PipelineOutput {
            gray,
            down_levels,
            up_levels,
            report,
            compressed,
            restored,
        })
    }
}

/// Applies `step` `levels` times, feeding each output into the next call.
fn resample_chain(
    start: &PixelGrid,
    levels: usize,
    step: fn(&PixelGrid) -> GrayPlaneResult<PixelGrid>,
) -> GrayPlaneResult<Vec<PixelGrid>> {
    let mut chain: Vec<PixelGrid> = Vec::with_capacity(levels);
    for _ in 0..levels {
        let next = step(chain.last().unwrap_or(start))?;
        chain.push(next);
    }
    Ok(chain)
}

fn first_difference(a: &PixelGrid, b: &PixelGrid) -> Option<(usize, usize)> {
    if a.dimensions() != b.dimensions() {
        return Some((0, 0));
    }
    let height = a.height();
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .position(|(lhs, rhs)| lhs != rhs)
        .map(|idx| (idx / height, idx % height))
}
