//! Error type for the optimizer entry points.
//!
//! All validation happens before the first byte is written, so a returned
//! error always leaves the caller's buffer untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Quantization strength below zero.
    #[error("Invalid quantization {0}: must be >= 0")]
    InvalidQuantization(i32),

    #[error("Unsupported bytes per pixel: {0} (max 4)")]
    UnsupportedBytesPerPixel(usize),

    #[error("Palette-indexed buffers need 1 byte per pixel, got {0}")]
    IndexedBytesPerPixel(usize),

    #[error("Stride {stride} is smaller than a row of {row_bytes} bytes")]
    StrideTooSmall { stride: usize, row_bytes: usize },

    #[error("Buffer too small: {len} bytes (need {required})")]
    BufferTooSmall { len: usize, required: usize },

    /// Palette with more entries than a byte can index.
    #[error("Palette has {0} entries (max 256)")]
    PaletteTooLarge(usize),

    /// A pixel references a palette entry that does not exist. The buffer and
    /// palette handed in do not belong together.
    #[error("Palette index {index} at byte {offset} is out of range (palette has {palette_len} entries)")]
    IndexOutOfRange {
        index: u8,
        offset: usize,
        palette_len: usize,
    },
}
