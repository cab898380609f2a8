//! Low-cost perceptual color difference.
//!
//! The metric is the "redmean" weighted Euclidean approximation
//! (<https://www.compuphase.com/cmetric.htm>) computed on 16-bit straight
//! channels. Red and blue differences are weighted by how red the pair is
//! on average, green gets a fixed 4/3 weight, and alpha passes through.
//!
//! ```text
//! dR' = (2 * FULL + redMean) * dR / (3 * FULL)
//! dG' = 4 * dG / 3
//! dB' = (3 * FULL - redMean) * dB / (3 * FULL)
//! dA' = dA
//! ```

use super::delta::ColorDelta;
use super::rgba::{Rgba, FULL_SCALE};

/// Undo alpha premultiplication of a 16-bit channel.
///
/// Fully transparent colors have no recoverable color; their premultiplied
/// channels (all zero) are returned unchanged.
#[inline]
fn unpremultiply(channel: u32, alpha: u32) -> i64 {
    if alpha > 0 {
        (channel as i64 * FULL_SCALE as i64) / alpha as i64
    } else {
        channel as i64
    }
}

/// Weighted perceptual difference `a - b`.
///
/// Both colors are expanded to premultiplied 16-bit and then un-premultiplied
/// with the same full-scale constant, so the RGB differences compare straight
/// colors. All products use 64-bit intermediates and truncating division.
///
/// # Example
/// ```
/// use lossy_filter::{perceptual_difference, ColorDelta, Rgba};
///
/// let white = Rgba::opaque(255, 255, 255);
/// assert_eq!(perceptual_difference(white, white), ColorDelta::ZERO);
///
/// // Pure green difference carries the fixed 4/3 weight
/// let d = perceptual_difference(Rgba::opaque(0, 3, 0), Rgba::opaque(0, 0, 0));
/// assert_eq!(d, ColorDelta::new(0, 4 * 3 * 257 / 3, 0, 0));
/// ```
pub fn perceptual_difference(a: Rgba, b: Rgba) -> ColorDelta {
    let ca = a.to_rgba16();
    let cb = b.to_rgba16();
    let full = FULL_SCALE as i64;

    let straight_a = [
        unpremultiply(ca[0], ca[3]),
        unpremultiply(ca[1], ca[3]),
        unpremultiply(ca[2], ca[3]),
    ];
    let straight_b = [
        unpremultiply(cb[0], cb[3]),
        unpremultiply(cb[1], cb[3]),
        unpremultiply(cb[2], cb[3]),
    ];

    let dr = straight_a[0] - straight_b[0];
    let dg = straight_a[1] - straight_b[1];
    let db = straight_a[2] - straight_b[2];
    let da = ca[3] as i64 - cb[3] as i64;

    let red_mean = (straight_a[0] + straight_b[0]) / 2;

    ColorDelta::new(
        ((2 * full + red_mean) * dr / (3 * full)) as i32,
        (4 * dg / 3) as i32,
        ((3 * full - red_mean) * db / (3 * full)) as i32,
        da as i32,
    )
}
