//! Error diffusion window.
//!
//! Both optimizers record one [`ColorDelta`] per processed pixel and, before
//! deciding the next pixel, pull a weighted forecast from the finalized
//! neighbors through a [`Kernel`]. Only the rows the kernel can reach are
//! kept, so memory is independent of image height.

mod kernel;

pub use kernel::*;

use crate::color::ColorDelta;

/// Ring of error rows addressed relative to the current pixel.
///
/// # Usage Pattern
///
/// 1. Create with `new(width, kernel)` (all cells zero)
/// 2. For each row:
///    a. Read the forecast with `diffuse(x)`
///    b. Store the pixel's error with `record(x, delta)`
///    c. After the row is complete, call `advance_row()`
///
/// Rows are padded by `kernel.reach` cells on each side, so taps that fall
/// outside the image read zero. Columns that are never recorded (such as
/// column 0) also stay zero.
#[derive(Debug)]
pub struct ErrorRing {
    /// rows[0] is the current row, rows[1] the row above, etc.
    rows: Vec<Vec<ColorDelta>>,
    kernel: Kernel,
}

impl ErrorRing {
    /// Create a zeroed ring for an image `width` pixels wide.
    pub fn new(width: usize, kernel: Kernel) -> Self {
        let row_len = width + 2 * kernel.reach;
        Self {
            rows: (0..=kernel.max_dy)
                .map(|_| vec![ColorDelta::ZERO; row_len])
                .collect(),
            kernel,
        }
    }

    #[inline]
    fn cell(&self, x: usize, dx: i32) -> usize {
        debug_assert!(dx.unsigned_abs() as usize <= self.kernel.reach);
        (x + self.kernel.reach).wrapping_add_signed(dx as isize)
    }

    /// Weighted error forecast for column `x` of the current row.
    ///
    /// Each component is rounded half away from zero before the division,
    /// which keeps the forecast free of a directional bias.
    pub fn diffuse(&self, x: usize) -> ColorDelta {
        let mut sum = [0i32; 4];
        for &(dx, dy, weight) in self.kernel.taps {
            let stored = self.rows[dy][self.cell(x, dx)];
            for (s, e) in sum.iter_mut().zip(stored.0) {
                *s += weight * e;
            }
        }

        let half = self.kernel.half_weight();
        let mut delta = ColorDelta::ZERO;
        for (d, s) in delta.0.iter_mut().zip(sum) {
            let rounded = if s < 0 { s - half } else { s + half };
            *d = rounded / self.kernel.divisor;
        }
        delta
    }

    /// Store the error committed at column `x` of the current row.
    #[inline]
    pub fn record(&mut self, x: usize, delta: ColorDelta) {
        let cell = self.cell(x, 0);
        self.rows[0][cell] = delta;
    }

    /// Advance to the next row.
    ///
    /// Rotates the ring: the current row becomes the row above, the oldest
    /// row is zeroed and reused as the new current row.
    pub fn advance_row(&mut self) {
        // Rotate right: [0,1,2] -> [2,0,1]
        self.rows.rotate_right(1);
        if let Some(current) = self.rows.first_mut() {
            current.fill(ColorDelta::ZERO);
        }
    }
}
