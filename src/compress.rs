//! Color conversion and optimizer dispatch for a decoded bitmap.

use lossy_filter::{optimize_for_average_filter, optimize_for_paeth_filter};

use crate::bitmap::{Bitmap, PixelData};
use crate::error::LossyError;

/// Target layout requested for the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorConversion {
    /// Keep the decoded layout (palette images stay palette images).
    #[default]
    None,
    /// Convert to 8-bit luma.
    Grayscale,
    /// Convert to 32-bit RGBA.
    Rgba,
}

impl ColorConversion {
    /// Resolve the pair of CLI switches. Both or neither means no conversion.
    pub fn from_flags(rgba: bool, grayscale: bool) -> Self {
        match (rgba, grayscale) {
            (true, false) => ColorConversion::Rgba,
            (false, true) => ColorConversion::Grayscale,
            _ => ColorConversion::None,
        }
    }
}

/// Convert `bitmap` as requested and quantize it in place.
///
/// Gray and RGBA pixels go through the Average-filter optimizer, palette
/// indices through the Paeth-filter optimizer.
pub fn compress(
    bitmap: Bitmap,
    conversion: ColorConversion,
    quantization: i32,
) -> Result<Bitmap, LossyError> {
    let mut bitmap = match conversion {
        ColorConversion::None => bitmap,
        ColorConversion::Grayscale => bitmap.into_gray(),
        ColorConversion::Rgba => bitmap.into_rgba(),
    };

    let layout = bitmap.layout();
    match bitmap.pixels_mut() {
        PixelData::Gray(data) | PixelData::Rgba(data) => {
            optimize_for_average_filter(data, layout, quantization)?;
        }
        PixelData::Indexed { indices, palette } => {
            optimize_for_paeth_filter(indices, layout, quantization, palette)?;
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossy_filter::{FilterError, Rgba};
    use pretty_assertions::assert_eq;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x * 7 + y * 13) as u8))
            .collect();
        Bitmap::new(width, height, PixelData::Gray(data)).unwrap()
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(ColorConversion::from_flags(false, false), ColorConversion::None);
        assert_eq!(ColorConversion::from_flags(true, false), ColorConversion::Rgba);
        assert_eq!(ColorConversion::from_flags(false, true), ColorConversion::Grayscale);
        assert_eq!(ColorConversion::from_flags(true, true), ColorConversion::None);
    }

    #[test]
    fn test_zero_strength_only_converts() {
        let original = gradient(8, 8);
        let result = compress(original.clone(), ColorConversion::Rgba, 0).unwrap();
        assert_eq!(result, original.into_rgba());
    }

    #[test]
    fn test_rgba_conversion_keeps_straight_alpha() {
        let bitmap = Bitmap::new(
            2,
            2,
            PixelData::Indexed {
                indices: vec![0; 4],
                palette: vec![Rgba::new(200, 100, 50, 128)],
            },
        )
        .unwrap();
        let result = compress(bitmap, ColorConversion::Rgba, 0).unwrap();
        assert_eq!(
            result.into_pixels(),
            PixelData::Rgba([200, 100, 50, 128].repeat(4))
        );
    }

    #[test]
    fn test_gray_is_quantized() {
        let original = gradient(16, 16);
        let result = compress(original.clone(), ColorConversion::None, 40).unwrap();
        assert!(matches!(result.pixels(), PixelData::Gray(_)));
        assert_ne!(result, original);
    }

    #[test]
    fn test_palette_stays_indexed() {
        let palette = vec![Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)];
        let bitmap = Bitmap::new(
            2,
            2,
            PixelData::Indexed {
                indices: vec![0, 1, 1, 0],
                palette: palette.clone(),
            },
        )
        .unwrap();
        let result = compress(bitmap, ColorConversion::None, 20).unwrap();
        match result.into_pixels() {
            PixelData::Indexed { palette: kept, .. } => assert_eq!(kept, palette),
            other => panic!("Expected indexed pixels, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_strength_is_rejected() {
        let result = compress(gradient(4, 4), ColorConversion::None, -1);
        assert!(matches!(
            result,
            Err(LossyError::Filter(FilterError::InvalidQuantization(-1)))
        ));
    }
}
