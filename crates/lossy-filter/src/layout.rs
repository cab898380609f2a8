//! Geometry of a caller-owned pixel buffer.

use crate::error::FilterError;

/// Largest supported pixel size, one byte per [`ColorDelta`](crate::ColorDelta) component.
pub const MAX_BYTES_PER_PIXEL: usize = 4;

/// Dimensions and addressing of a row-major pixel buffer.
///
/// Pixel `(x, y)` channel `c` lives at `y * stride + x * bytes_per_pixel + c`.
/// Rows may be padded (`stride > width * bytes_per_pixel`); padding bytes
/// are never read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    /// Bytes from the start of one row to the start of the next.
    pub stride: usize,
    pub bytes_per_pixel: usize,
}

impl Layout {
    pub fn new(width: usize, height: usize, stride: usize, bytes_per_pixel: usize) -> Self {
        Self {
            width,
            height,
            stride,
            bytes_per_pixel,
        }
    }

    /// Layout without row padding.
    ///
    /// # Example
    /// ```
    /// use lossy_filter::Layout;
    /// let layout = Layout::packed(10, 4, 4);
    /// assert_eq!(layout.stride, 40);
    /// assert_eq!(layout.required_len(), 160);
    /// ```
    pub fn packed(width: usize, height: usize, bytes_per_pixel: usize) -> Self {
        Self::new(width, height, width.saturating_mul(bytes_per_pixel), bytes_per_pixel)
    }

    /// Bytes of pixel data in one row (excluding padding).
    ///
    /// Saturates at `usize::MAX` for dimensions no buffer can hold.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width.saturating_mul(self.bytes_per_pixel)
    }

    /// Smallest buffer length that holds every pixel.
    ///
    /// The last row does not need trailing padding. Saturates at
    /// `usize::MAX` when the length is not addressable.
    pub fn required_len(&self) -> usize {
        self.checked_required_len().unwrap_or(usize::MAX)
    }

    fn checked_required_len(&self) -> Option<usize> {
        let row_bytes = self.width.checked_mul(self.bytes_per_pixel)?;
        if self.width == 0 || self.height == 0 {
            return Some(0);
        }
        (self.height - 1)
            .checked_mul(self.stride)?
            .checked_add(row_bytes)
    }

    /// Whether no pixel has both an upper and a left neighbor.
    ///
    /// Such buffers have nothing to optimize: row 0 and column 0 are never
    /// rewritten.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 1 || self.height <= 1 || self.bytes_per_pixel == 0
    }

    /// Check the layout against a buffer of `len` bytes.
    pub fn validate(&self, len: usize) -> Result<(), FilterError> {
        if self.bytes_per_pixel > MAX_BYTES_PER_PIXEL {
            return Err(FilterError::UnsupportedBytesPerPixel(self.bytes_per_pixel));
        }
        let Some(required) = self.checked_required_len() else {
            return Err(FilterError::BufferTooSmall {
                len,
                required: usize::MAX,
            });
        };
        if self.height > 1 && self.stride < self.row_bytes() {
            return Err(FilterError::StrideTooSmall {
                stride: self.stride,
                row_bytes: self.row_bytes(),
            });
        }
        if len < required {
            return Err(FilterError::BufferTooSmall { len, required });
        }
        Ok(())
    }

    /// Byte offsets of the pixel-data portion of each row.
    pub fn rows(&self) -> impl Iterator<Item = std::ops::Range<usize>> + '_ {
        (0..self.height).map(move |y| {
            let start = y * self.stride;
            start..start + self.row_bytes()
        })
    }
}
