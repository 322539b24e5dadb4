//! Bit-plane run-length codec.
//!
//! Every sample is split into 8 bit planes, most significant first. For each
//! plane and each column `x`, the bits down the column are run-length coded
//! as `<bit>:<count>,` tokens and the row is closed with `\n`. The stream
//! therefore has `8 * width` rows and the counts of every row sum to
//! `height`.
//!
//! Each row's run state starts at bit `1` with count 0, so a column whose
//! first bit is `0` opens with the empty token `1:0,`. Decoding accepts
//! zero-count tokens anywhere.

use crate::codec::{CompressedImage, CompressorKind, ImageCompressor};
use crate::image::{checked_len, PixelGrid};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{plane_bit, PLANES};
use crate::util::{GrayPlaneError, GrayPlaneResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

const ROW_SEPARATOR: char = '\n';
const BIT_SEPARATOR: char = ':';
const TOKEN_SEPARATOR: char = ',';

/// Textual bit-plane run-length codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitPlaneCodec {
    parallel: bool,
}

impl BitPlaneCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes planes concurrently when the `rayon` feature is enabled.
    ///
    /// Without the feature the flag is accepted and ignored.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns whether plane-parallel encoding was requested.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    fn encode(&self, grid: &PixelGrid) -> String {
        #[cfg(feature = "rayon")]
        {
            if self.parallel {
                let planes: Vec<String> = (0..PLANES)
                    .into_par_iter()
                    .map(|plane| encode_plane(grid, plane))
                    .collect();
                return planes.concat();
            }
        }

        let mut out = String::new();
        for plane in 0..PLANES {
            out.push_str(&encode_plane(grid, plane));
        }
        out
    }
}

impl ImageCompressor for BitPlaneCodec {
    fn kind(&self) -> CompressorKind {
        CompressorKind::BitPlaneRle
    }

    fn compress(&self, grid: &PixelGrid) -> GrayPlaneResult<CompressedImage> {
        let _stage = trace_span!(
            "bitplane_compress",
            width = grid.width(),
            height = grid.height(),
            parallel = self.parallel
        );
        let encoding = self.encode(grid);
        trace_event!("bitplane_compress_done", encoded_bytes = encoding.len());
        Ok(CompressedImage::new(grid.width(), grid.height(), encoding))
    }

    fn decompress(&self, image: &CompressedImage) -> GrayPlaneResult<PixelGrid> {
        let _stage = trace_span!(
            "bitplane_decompress",
            width = image.width(),
            height = image.height()
        );

        let width = image.width();
        let height = image.height();
        let len = checked_len(width, height)?;

        let mut rows: Vec<&str> = image.encoding().split(ROW_SEPARATOR).collect();
        if rows.last() == Some(&"") {
            rows.pop();
        }
        let expected_rows = PLANES
            .checked_mul(width)
            .ok_or_else(|| GrayPlaneError::malformed(0, format!("width {width} too large")))?;
        if rows.len() != expected_rows {
            return Err(GrayPlaneError::malformed(
                rows.len(),
                format!("expected {expected_rows} rows, found {}", rows.len()),
            ));
        }

        let mut samples = vec![0u8; len];
        for (row_idx, row) in rows.iter().enumerate() {
            let plane = row_idx / width;
            let x = row_idx % width;
            let mask = 1u8 << (PLANES - 1 - plane);
            let column = &mut samples[x * height..(x + 1) * height];
            decode_row(row, row_idx, mask, column)?;
        }

        let grid = PixelGrid::new(samples, width, height)?;
        trace_event!("bitplane_decompress_done", pixels = len);
        Ok(grid)
    }
}

/// Encodes all columns of one bit plane.
fn encode_plane(grid: &PixelGrid, plane: usize) -> String {
    let mut out = String::new();
    for column in grid.columns() {
        let mut current = '1';
        let mut count = 0usize;
        for &sample in column {
            let bit = if plane_bit(sample, plane) == 1 { '1' } else { '0' };
            if bit == current {
                count += 1;
            } else {
                push_token(&mut out, current, count);
                current = bit;
                count = 1;
            }
        }
        push_token(&mut out, current, count);
        out.push(ROW_SEPARATOR);
    }
    out
}

fn push_token(out: &mut String, bit: char, count: usize) {
    out.push(bit);
    out.push(BIT_SEPARATOR);
    out.push_str(&count.to_string());
    out.push(TOKEN_SEPARATOR);
}

/// Expands one row into `column`, setting `mask` wherever the bit is 1.
fn decode_row(row: &str, row_idx: usize, mask: u8, column: &mut [u8]) -> GrayPlaneResult<()> {
    let height = column.len();
    let row = row.strip_suffix('\r').unwrap_or(row);
    let body = row.strip_suffix(TOKEN_SEPARATOR).unwrap_or(row);
    if body.is_empty() {
        return Err(GrayPlaneError::malformed(row_idx, "empty row"));
    }

    let mut filled = 0usize;
    for token in body.split(TOKEN_SEPARATOR) {
        let (bit, count) = token.split_once(BIT_SEPARATOR).ok_or_else(|| {
            GrayPlaneError::malformed(row_idx, format!("token {token:?} lacks ':'"))
        })?;
        let set = match bit {
            "0" => false,
            "1" => true,
            other => {
                return Err(GrayPlaneError::malformed(
                    row_idx,
                    format!("bit {other:?} is not '0' or '1'"),
                ))
            }
        };
        let count: usize = count.parse().map_err(|_| {
            GrayPlaneError::malformed(row_idx, format!("count {count:?} is not a number"))
        })?;
        let end = filled
            .checked_add(count)
            .filter(|&end| end <= height)
            .ok_or_else(|| {
                GrayPlaneError::malformed(row_idx, format!("runs exceed height {height}"))
            })?;
        if set {
            for sample in &mut column[filled..end] {
                *sample |= mask;
            }
        }
        filled = end;
    }

    if filled != height {
        return Err(GrayPlaneError::malformed(
            row_idx,
            format!("runs cover {filled} of {height} samples"),
        ));
    }
    Ok(())
}
