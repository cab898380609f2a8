//! Input decoding.
//!
//! PNG files are read with the `png` crate without palette expansion, so a
//! palette image reaches the optimizer as indices plus palette. Gray PNGs
//! without a transparency key stay single-channel. Everything else, and every
//! non-PNG format the `image` crate knows, becomes straight RGBA.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use lossy_filter::Rgba;

use crate::bitmap::{Bitmap, PixelData};
use crate::error::LossyError;

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Decode an image file held in memory.
pub fn decode(bytes: &[u8]) -> Result<Bitmap, LossyError> {
    if bytes.starts_with(PNG_SIGNATURE) {
        if let Some(bitmap) = decode_png_native(bytes)? {
            return Ok(bitmap);
        }
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        return from_dynamic(image);
    }
    from_dynamic(image::load_from_memory(bytes)?)
}

/// Decode palette and opaque gray PNGs in their stored layout.
///
/// Returns `None` for layouts that are handled as RGBA.
fn decode_png_native(bytes: &[u8]) -> Result<Option<Bitmap>, LossyError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    let kept = match info.color_type {
        png::ColorType::Indexed => true,
        png::ColorType::Grayscale => info.trns.is_none(),
        _ => false,
    };
    if !kept {
        return Ok(None);
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let width = frame.width as usize;
    let depth = frame.bit_depth as u8;
    let samples = unpack_rows(&buf, frame.line_size, width, frame.height as usize, depth);

    let pixels = match frame.color_type {
        png::ColorType::Indexed => {
            let info = reader.info();
            let palette = read_palette(
                info.palette.as_deref().unwrap_or_default(),
                info.trns.as_deref().unwrap_or_default(),
                &samples,
            );
            tracing::debug!(colors = palette.len(), depth, "Decoded palette PNG");
            PixelData::Indexed {
                indices: samples,
                palette,
            }
        }
        _ => {
            tracing::debug!(depth, "Decoded gray PNG");
            PixelData::Gray(scale_gray(samples, depth))
        }
    };

    Bitmap::new(frame.width, frame.height, pixels).map(Some)
}

/// Unpack 1/2/4-bit samples to one byte each, dropping row padding.
fn unpack_rows(buf: &[u8], line_size: usize, width: usize, height: usize, depth: u8) -> Vec<u8> {
    if depth == 8 {
        return buf
            .chunks(line_size)
            .take(height)
            .flat_map(|row| &row[..width])
            .copied()
            .collect();
    }

    let bits = depth as usize;
    let mask = (1u8 << depth) - 1;
    let mut samples = Vec::with_capacity(width * height);
    for row in buf.chunks(line_size).take(height) {
        samples.extend((0..width).map(|x| {
            let bit = x * bits;
            let shift = 8 - bits - bit % 8;
            (row[bit / 8] >> shift) & mask
        }));
    }
    samples
}

/// Stretch low bit-depth gray to the full byte range.
fn scale_gray(mut samples: Vec<u8>, depth: u8) -> Vec<u8> {
    let factor = match depth {
        1 => 0xFF,
        2 => 0x55,
        4 => 0x11,
        _ => return samples,
    };
    for sample in &mut samples {
        *sample *= factor;
    }
    samples
}

/// PLTE + tRNS as colors, padded with opaque black to cover every index used.
fn read_palette(plte: &[u8], trns: &[u8], indices: &[u8]) -> Vec<Rgba> {
    let mut palette: Vec<Rgba> = plte
        .chunks_exact(3)
        .enumerate()
        .map(|(i, rgb)| Rgba::new(rgb[0], rgb[1], rgb[2], trns.get(i).copied().unwrap_or(0xFF)))
        .collect();

    let used = indices.iter().max().map_or(0, |&i| i as usize + 1);
    if used > palette.len() {
        tracing::warn!(
            colors = palette.len(),
            used,
            "Palette shorter than indices, padding with black"
        );
        palette.resize(used, Rgba::opaque(0, 0, 0));
    }
    palette
}

fn from_dynamic(image: DynamicImage) -> Result<Bitmap, LossyError> {
    let (width, height) = (image.width(), image.height());
    let pixels = match image {
        DynamicImage::ImageLuma8(gray) => PixelData::Gray(gray.into_raw()),
        deep @ DynamicImage::ImageLuma16(_) => PixelData::Gray(deep.to_luma8().into_raw()),
        other => PixelData::Rgba(other.to_rgba8().into_raw()),
    };
    Bitmap::new(width, height, pixels)
}
