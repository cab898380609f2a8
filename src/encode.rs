//! PNG output.

use std::io::Cursor;

use lossy_filter::Rgba;

use crate::bitmap::{Bitmap, PixelData};
use crate::error::LossyError;

/// Encode `bitmap` as an 8-bit PNG.
///
/// Uses best DEFLATE compression and lets the encoder pick a filter per row,
/// which is where the quantized residuals pay off. With `oxipng` set, the
/// result is additionally re-compressed losslessly.
pub fn encode(bitmap: &Bitmap, oxipng: bool) -> Result<Vec<u8>, LossyError> {
    let png_bytes = encode_png(bitmap)?;
    if !oxipng {
        return Ok(png_bytes);
    }
    Ok(recompress(png_bytes))
}

fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, LossyError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, bitmap.width(), bitmap.height());
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

        let data = match bitmap.pixels() {
            PixelData::Gray(data) => {
                encoder.set_color(png::ColorType::Grayscale);
                data
            }
            PixelData::Rgba(data) => {
                encoder.set_color(png::ColorType::Rgba);
                data
            }
            PixelData::Indexed { indices, palette } => {
                encoder.set_color(png::ColorType::Indexed);
                encoder.set_palette(palette_chunk(palette));
                if let Some(trns) = transparency_chunk(palette) {
                    encoder.set_trns(trns);
                }
                indices
            }
        };

        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
        writer.finish()?;
    }
    Ok(buf.into_inner())
}

/// PLTE payload: RGB triples.
fn palette_chunk(palette: &[Rgba]) -> Vec<u8> {
    palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
}

/// tRNS payload: alpha up to the last non-opaque entry, `None` if all are opaque.
fn transparency_chunk(palette: &[Rgba]) -> Option<Vec<u8>> {
    let last = palette.iter().rposition(|c| c.a != 0xFF)?;
    Some(palette[..=last].iter().map(|c| c.a).collect())
}

/// Lossless re-compression with oxipng, keeping the input on failure.
fn recompress(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) if optimized.len() < png_bytes.len() => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "oxipng re-compressed output"
            );
            optimized
        }
        Ok(_) => png_bytes,
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping encoder output");
            png_bytes
        }
    }
}
