//! Decoded image in one of the three layouts the optimizers work on.

use lossy_filter::{Layout, Rgba};

use crate::error::LossyError;

/// Pixel storage, always packed rows of 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// One luma byte per pixel.
    Gray(Vec<u8>),
    /// Four bytes per pixel, straight (non-premultiplied) alpha.
    Rgba(Vec<u8>),
    /// One palette index per pixel.
    Indexed { indices: Vec<u8>, palette: Vec<Rgba> },
}

impl PixelData {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelData::Gray(_) | PixelData::Indexed { .. } => 1,
            PixelData::Rgba(_) => 4,
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            PixelData::Gray(data) | PixelData::Rgba(data) => data,
            PixelData::Indexed { indices, .. } => indices,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: PixelData,
}

impl Bitmap {
    /// Wrap pixel data, checking it covers `width * height` pixels exactly.
    pub fn new(width: u32, height: u32, pixels: PixelData) -> Result<Self, LossyError> {
        let expected = width as usize * height as usize * pixels.bytes_per_pixel();
        let actual = pixels.bytes().len();
        if actual != expected {
            return Err(LossyError::PixelCount {
                width,
                height,
                expected,
                actual,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &PixelData {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelData {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> PixelData {
        self.pixels
    }

    /// Packed layout of the pixel buffer.
    pub fn layout(&self) -> Layout {
        Layout::packed(
            self.width as usize,
            self.height as usize,
            self.pixels.bytes_per_pixel(),
        )
    }

    /// Convert to straight RGBA.
    ///
    /// Indices past the end of the palette read as opaque black.
    pub fn into_rgba(self) -> Self {
        let rgba = match self.pixels {
            PixelData::Rgba(data) => data,
            PixelData::Gray(data) => data.iter().flat_map(|&v| [v, v, v, 0xFF]).collect(),
            PixelData::Indexed { indices, palette } => indices
                .iter()
                .flat_map(|&i| palette_color(&palette, i).to_bytes())
                .collect(),
        };
        Self {
            width: self.width,
            height: self.height,
            pixels: PixelData::Rgba(rgba),
        }
    }

    /// Convert to 8-bit luma.
    ///
    /// Color is weighted over alpha-premultiplied channels, so transparent
    /// areas turn black.
    pub fn into_gray(self) -> Self {
        let gray = match self.pixels {
            PixelData::Gray(data) => data,
            PixelData::Rgba(data) => data
                .chunks_exact(4)
                .map(|c| luma(Rgba::new(c[0], c[1], c[2], c[3])))
                .collect(),
            PixelData::Indexed { indices, palette } => {
                let lut: Vec<u8> = palette.iter().map(|&c| luma(c)).collect();
                indices
                    .iter()
                    .map(|&i| lut.get(i as usize).copied().unwrap_or(0))
                    .collect()
            }
        };
        Self {
            width: self.width,
            height: self.height,
            pixels: PixelData::Gray(gray),
        }
    }
}

fn palette_color(palette: &[Rgba], index: u8) -> Rgba {
    palette
        .get(index as usize)
        .copied()
        .unwrap_or(Rgba::opaque(0, 0, 0))
}

/// ITU-R BT.601 luma from premultiplied 16-bit channels.
pub fn luma(color: Rgba) -> u8 {
    let [r, g, b, _] = color.to_rgba16();
    ((19595 * r as u64 + 38470 * g as u64 + 7471 * b as u64 + (1 << 15)) >> 24) as u8
}
