//! Average-filter optimizer for gray and direct-color buffers.
//!
//! For every byte with both an upper and a left neighbor, the residual the
//! PNG "Average" filter would produce is snapped to a multiple of the
//! quantization step. The rounding error of each pixel goes into a Sierra
//! diffusion ring and is folded into the decisions for later pixels.

use crate::color::ColorDelta;
use crate::diffusion::{ErrorRing, SIERRA};
use crate::error::FilterError;
use crate::layout::Layout;

use super::predict::average_predictor;

/// Quantize residuals under the PNG average filter, in place.
///
/// `layout.bytes_per_pixel` may be 1 (gray or alpha) through 4 (RGBA); each
/// channel is handled independently with its own error component.
///
/// # Behavior
///
/// - `quantization == 0` leaves the buffer byte-for-byte unchanged.
/// - Row 0 and column 0 are never modified.
/// - A byte is only rewritten when the snapped value fits in `0..=255`;
///   otherwise it keeps its value and contributes zero error.
/// - Pixels are visited in strict raster order: every decision depends on
///   already rewritten neighbors and on error diffused from earlier pixels.
///
/// # Errors
///
/// [`FilterError::InvalidQuantization`] for negative strength, or a layout
/// error when the buffer cannot hold `layout`. The buffer is untouched in
/// either case.
///
/// # Example
///
/// ```
/// use lossy_filter::{optimize_for_average_filter, Layout};
///
/// let mut pixels = vec![128u8; 9];
/// optimize_for_average_filter(&mut pixels, Layout::packed(3, 3, 1), 10).unwrap();
/// assert_eq!(pixels, vec![128u8; 9]);
/// ```
pub fn optimize_for_average_filter(
    pixels: &mut [u8],
    layout: Layout,
    quantization: i32,
) -> Result<(), FilterError> {
    if quantization < 0 {
        return Err(FilterError::InvalidQuantization(quantization));
    }
    layout.validate(pixels.len())?;
    if quantization == 0 || layout.is_degenerate() {
        return Ok(());
    }

    tracing::debug!(
        width = layout.width,
        height = layout.height,
        bytes_per_pixel = layout.bytes_per_pixel,
        quantization,
        "Optimizing for average filter"
    );

    let step = quantization;
    let half_step = step / 2;
    let bpp = layout.bytes_per_pixel;
    let stride = layout.stride;
    let mut ring = ErrorRing::new(layout.width, SIERRA);

    for y in 1..layout.height {
        for x in 1..layout.width {
            let diffusion = ring.diffuse(x);
            let mut error_here = ColorDelta::ZERO;

            for c in 0..bpp {
                let offset = y * stride + x * bpp + c;
                let here = pixels[offset] as i32;
                let average = average_predictor(pixels[offset - stride], pixels[offset - bpp]);

                if let Some(snapped) = snap_residual(here, average, diffusion[c], step, half_step) {
                    pixels[offset] = snapped;
                    error_here[c] = here - snapped as i32;
                }
            }

            ring.record(x, error_here);
        }
        ring.advance_row();
    }

    Ok(())
}

/// Snap `here + diffusion` so its distance from `average` is a multiple of `step`.
///
/// Uses truncating remainder after adding half a step, so positive residuals
/// round to nearest and negative ones toward zero. Returns `None` when the
/// result leaves the byte range.
#[inline]
fn snap_residual(here: i32, average: u8, diffusion: i32, step: i32, half_step: i32) -> Option<u8> {
    let average = average as i32;
    let mut residual = diffusion + here - average + half_step;
    residual -= residual % step;
    u8::try_from(residual + average).ok()
}
