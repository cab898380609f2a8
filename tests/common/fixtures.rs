//! Test fixtures: deterministic pixel data and PNG files on disk.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

/// Deterministic pseudo-random bytes in `low..low + span`.
pub fn noise(len: usize, low: u8, span: u32, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345) & 0x7fff_ffff;
            low + ((state >> 16) % span) as u8
        })
        .collect()
}

/// Horizontal gradient with mild noise, one byte per sample.
pub fn noisy_gradient(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let jitter = noise(width * height * channels, 0, 24, 77);
    (0..width * height * channels)
        .map(|i| {
            let x = (i / channels) % width;
            (x * 160 / width) as u8 + 40 + jitter[i]
        })
        .collect()
}

/// Chunks written alongside the image data.
#[derive(Default)]
pub struct PngChunks<'a> {
    pub palette: Option<&'a [u8]>,
    pub trns: Option<&'a [u8]>,
}

/// Write a PNG with raw (already packed) row data.
pub fn write_png(
    dir: &Path,
    name: &str,
    (width, height): (u32, u32),
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
    chunks: PngChunks<'_>,
) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(depth);
    if let Some(palette) = chunks.palette {
        encoder.set_palette(palette.to_vec());
    }
    if let Some(trns) = chunks.trns {
        encoder.set_trns(trns.to_vec());
    }
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(data).unwrap();
    writer.finish().unwrap();
    path
}

/// Write an 8-bit gray PNG.
pub fn write_gray(dir: &Path, name: &str, width: u32, height: u32, data: &[u8]) -> PathBuf {
    write_png(
        dir,
        name,
        (width, height),
        png::ColorType::Grayscale,
        png::BitDepth::Eight,
        data,
        PngChunks::default(),
    )
}

/// Write an 8-bit RGBA PNG.
pub fn write_rgba(dir: &Path, name: &str, width: u32, height: u32, data: &[u8]) -> PathBuf {
    write_png(
        dir,
        name,
        (width, height),
        png::ColorType::Rgba,
        png::BitDepth::Eight,
        data,
        PngChunks::default(),
    )
}

/// Raw contents of a PNG file, without any expansion.
pub struct RawPng {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub bit_depth: png::BitDepth,
    pub data: Vec<u8>,
    pub palette: Option<Vec<u8>>,
    pub trns: Option<Vec<u8>>,
}

pub fn read_png(path: &Path) -> RawPng {
    let bytes = std::fs::read(path).unwrap();
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut data = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data).unwrap();
    data.truncate(frame.buffer_size());
    let info = reader.info();
    RawPng {
        width: frame.width,
        height: frame.height,
        color_type: frame.color_type,
        bit_depth: frame.bit_depth,
        data,
        palette: info.palette.as_ref().map(|p| p.to_vec()),
        trns: info.trns.as_ref().map(|t| t.to_vec()),
    }
}

/// Decode any image file to straight RGBA through the `image` crate.
pub fn read_rgba(path: &Path) -> Vec<u8> {
    image::open(path).unwrap().to_rgba8().into_raw()
}
