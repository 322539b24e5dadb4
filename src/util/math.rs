//! Arithmetic helpers shared by the sampler, the analyzer and the codec.

/// Number of bit planes in an 8-bit sample.
pub(crate) const PLANES: usize = 8;

/// Divides `total` by `count` after a round trip through `f32`.
///
/// The sum is narrowed to single precision and truncated back before the
/// integer division, so totals above 2^24 lose their low bits exactly the
/// way the reference arithmetic does.
pub(crate) fn float_trunc_div(total: u64, count: u64) -> u64 {
    debug_assert!(count > 0);
    ((total as f32) as u64) / count
}

/// Returns bit `plane` of `sample` where plane 0 is the most significant bit.
#[inline]
pub(crate) fn plane_bit(sample: u8, plane: usize) -> u8 {
    (sample >> (PLANES - 1 - plane)) & 1
}

/// Weighted luma of an RGB triple, truncated toward zero.
#[inline]
pub(crate) fn luma(r: u8, g: u8, b: u8) -> u8 {
    let r = f64::from(r) * 0.3;
    let g = f64::from(g) * 0.59;
    let b = f64::from(b) * 0.11;
    (r + g + b) as u8
}

/// Per-pixel term accumulated by the deviation metric.
///
/// `^` is bitwise XOR here, not exponentiation.
#[inline]
pub(crate) fn xor_deviation_term(original: u8, modified: u8) -> i64 {
    let diff = (i64::from(original) ^ 2) - (i64::from(modified) ^ 2);
    (diff ^ 2).abs()
}
