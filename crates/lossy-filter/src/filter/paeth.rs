//! Paeth-filter optimizer for palette-indexed buffers.
//!
//! Palette indices have no arithmetic meaning, so residuals cannot be
//! snapped like channel values. Instead each pixel is steered toward the
//! index the PNG "Paeth" filter predicts (a zero residual) whenever that
//! palette color is perceptually close enough, once the error diffused from
//! earlier decisions is accounted for. Otherwise the nearest palette color
//! is searched for.

use crate::color::{perceptual_difference, ColorDelta, Rgba};
use crate::diffusion::{ErrorRing, FLOYD_STEINBERG};
use crate::error::FilterError;
use crate::layout::Layout;

use super::predict::paeth_predictor;

/// Largest palette a byte index can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// Rewrite palette indices in place to favor the Paeth prediction.
///
/// # Algorithm
///
/// For each pixel with an upper and a left neighbor:
///
/// 1. `paeth` = Paeth prediction over the neighboring index bytes
/// 2. `diffusion` = Floyd-Steinberg forecast from the error ring
/// 3. If `(|delta(here, palette[paeth]) + diffusion|² >> 16) < q²`, take
///    `paeth` without searching
/// 4. Otherwise take the palette entry minimizing `|delta(here, entry) + diffusion|²`,
///    preferring the lowest index on ties
/// 5. Record the chosen entry's delta in the ring
///
/// # Behavior
///
/// - `quantization == 0` or an empty palette leaves the buffer unchanged.
/// - Row 0 and column 0 are never modified.
/// - Every index written is `< palette.len()`.
///
/// # Errors
///
/// Besides layout and quantization errors, every index byte is checked
/// against the palette before any byte is rewritten;
/// [`FilterError::IndexOutOfRange`] reports the first offending byte.
///
/// # Example
///
/// ```
/// use lossy_filter::{optimize_for_paeth_filter, Layout, Rgba};
///
/// let palette = [Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255), Rgba::opaque(250, 250, 250)];
/// let mut pixels = vec![0, 1, 1, 2];
/// optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 1), 10, &palette).unwrap();
/// // Near-white is close enough to the predicted white
/// assert_eq!(pixels, vec![0, 1, 1, 1]);
/// ```
pub fn optimize_for_paeth_filter(
    pixels: &mut [u8],
    layout: Layout,
    quantization: i32,
    palette: &[Rgba],
) -> Result<(), FilterError> {
    if quantization < 0 {
        return Err(FilterError::InvalidQuantization(quantization));
    }
    if layout.bytes_per_pixel != 1 {
        return Err(FilterError::IndexedBytesPerPixel(layout.bytes_per_pixel));
    }
    layout.validate(pixels.len())?;
    if palette.len() > MAX_PALETTE_LEN {
        return Err(FilterError::PaletteTooLarge(palette.len()));
    }
    if quantization == 0 || palette.is_empty() || layout.is_degenerate() {
        return Ok(());
    }
    check_indices(pixels, &layout, palette.len())?;

    tracing::debug!(
        width = layout.width,
        height = layout.height,
        colors = palette.len(),
        quantization,
        "Optimizing for paeth filter"
    );

    let threshold = (quantization as u64) * (quantization as u64);
    let stride = layout.stride;
    let mut ring = ErrorRing::new(layout.width, FLOYD_STEINBERG);
    let mut searches = 0usize;

    for y in 1..layout.height {
        for x in 1..layout.width {
            let diffusion = ring.diffuse(x);

            let offset = y * stride + x;
            let here = palette[pixels[offset] as usize];
            let paeth = paeth_predictor(
                pixels[offset - 1],
                pixels[offset - stride],
                pixels[offset - stride - 1],
            );

            let paeth_delta = perceptual_difference(here, palette[paeth as usize]);
            let (chosen, delta) = if ((paeth_delta + diffusion).magnitude() >> 16) < threshold {
                (paeth, paeth_delta)
            } else {
                searches += 1;
                nearest_color(here, diffusion, palette)
            };

            pixels[offset] = chosen;
            ring.record(x, delta);
        }
        ring.advance_row();
    }

    tracing::trace!(searches, "Paeth prediction rejected");
    Ok(())
}

/// Palette entry whose delta from `here`, plus `diffusion`, is smallest.
///
/// Ties keep the lowest index. Returns the index and its delta (without the
/// diffusion term). `palette` must be non-empty and at most 256 entries.
fn nearest_color(here: Rgba, diffusion: ColorDelta, palette: &[Rgba]) -> (u8, ColorDelta) {
    let mut best_index = 0u8;
    let mut best_delta = perceptual_difference(here, palette[0]);
    let mut best_magnitude = (best_delta + diffusion).magnitude();

    for (i, &candidate) in palette.iter().enumerate().skip(1) {
        let delta = perceptual_difference(here, candidate);
        let magnitude = (delta + diffusion).magnitude();
        if magnitude < best_magnitude {
            best_magnitude = magnitude;
            best_delta = delta;
            best_index = i as u8;
        }
    }

    (best_index, best_delta)
}

/// Fail on the first index byte that does not address a palette entry.
fn check_indices(pixels: &[u8], layout: &Layout, palette_len: usize) -> Result<(), FilterError> {
    if palette_len >= MAX_PALETTE_LEN {
        return Ok(());
    }
    for row in layout.rows() {
        let start = row.start;
        if let Some(pos) = pixels[row].iter().position(|&i| i as usize >= palette_len) {
            return Err(FilterError::IndexOutOfRange {
                index: pixels[start + pos],
                offset: start + pos,
                palette_len,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grays() -> Vec<Rgba> {
        vec![
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(255, 255, 255),
            Rgba::opaque(250, 250, 250),
            Rgba::opaque(247, 247, 247),
        ]
    }

    #[test]
    fn test_nearest_color_without_diffusion_is_exact_match() {
        let palette = grays();
        for (i, &color) in palette.iter().enumerate() {
            let (index, delta) = nearest_color(color, ColorDelta::ZERO, &palette);
            assert_eq!(index as usize, i);
            assert_eq!(delta, ColorDelta::ZERO);
        }
    }

    #[test]
    fn test_nearest_color_prefers_lowest_index_on_tie() {
        let palette = vec![
            Rgba::opaque(9, 9, 9),
            Rgba::opaque(200, 0, 0),
            Rgba::opaque(200, 0, 0),
        ];
        let (index, _) = nearest_color(Rgba::opaque(200, 0, 0), ColorDelta::ZERO, &palette);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_nearest_color_compensates_diffusion() {
        // Diffused error says earlier pixels came out too bright, pull darker
        let palette = grays();
        let diffusion = ColorDelta::new(-560, -749, -376, 0);
        let (index, delta) = nearest_color(palette[2], diffusion, &palette);
        assert_eq!(index, 3);
        assert_eq!(delta, perceptual_difference(palette[2], palette[3]));
    }

    #[test]
    fn test_out_of_range_index_is_reported_before_writing() {
        let palette = grays();
        #[rustfmt::skip]
        let mut pixels = vec![
            0, 1, 1,
            1, 2, 9,
        ];
        let original = pixels.clone();
        let result = optimize_for_paeth_filter(&mut pixels, Layout::packed(3, 2, 1), 10, &palette);
        assert_eq!(
            result,
            Err(FilterError::IndexOutOfRange {
                index: 9,
                offset: 5,
                palette_len: 4
            })
        );
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_out_of_range_in_first_row_is_reported() {
        // Row 0 is never rewritten but is read as a neighbor
        let palette = grays();
        let mut pixels = vec![0, 200, 1, 1];
        let result = optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 1), 10, &palette);
        assert!(matches!(
            result,
            Err(FilterError::IndexOutOfRange { index: 200, offset: 1, .. })
        ));
    }

    #[test]
    fn test_padding_bytes_are_not_checked() {
        let palette = grays();
        // stride 3 for 2 pixels, padding byte 2 holds garbage
        let mut pixels = vec![0, 1, 255, 1, 2];
        let result = optimize_for_paeth_filter(&mut pixels, Layout::new(2, 2, 3, 1), 10, &palette);
        assert_eq!(result, Ok(()));
        assert_eq!(pixels, vec![0, 1, 255, 1, 1]);
    }

    #[test]
    fn test_multi_byte_pixels_are_rejected() {
        let mut pixels = vec![0u8; 16];
        let result = optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 4), 10, &grays());
        assert_eq!(result, Err(FilterError::IndexedBytesPerPixel(4)));
    }

    #[test]
    fn test_oversized_palette_is_rejected() {
        let palette = vec![Rgba::opaque(0, 0, 0); 257];
        let mut pixels = vec![0u8; 4];
        let result = optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 1), 10, &palette);
        assert_eq!(result, Err(FilterError::PaletteTooLarge(257)));
    }

    #[test]
    fn test_empty_palette_is_a_no_op() {
        let mut pixels = vec![3u8, 7, 9, 11];
        optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 1), 10, &[]).unwrap();
        assert_eq!(pixels, vec![3, 7, 9, 11]);
    }

    #[test]
    fn test_negative_quantization_is_rejected() {
        let mut pixels = vec![0u8, 1, 1, 2];
        let result = optimize_for_paeth_filter(&mut pixels, Layout::packed(2, 2, 1), -5, &grays());
        assert_eq!(result, Err(FilterError::InvalidQuantization(-5)));
    }
}
