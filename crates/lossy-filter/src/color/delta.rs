//! Signed color error vectors.

use std::ops::{Add, Index, IndexMut};

/// Number of components in a [`ColorDelta`] (R, G, B, A).
pub const DELTA_COMPONENTS: usize = 4;

/// A signed 4-component error vector (R, G, B, A).
///
/// Used both for perceptual distances between palette entries and for the
/// quantization error carried by the diffusion ring. For 1-channel buffers
/// only component 0 is meaningful; the others stay zero.
///
/// Components are `i32`: a single perceptual difference is bounded by
/// roughly `4/3 * 0xFFFF`, and the diffusion kernels sum at most 16 weighted
/// cells before dividing, which stays well inside the `i32` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorDelta(pub [i32; DELTA_COMPONENTS]);

impl ColorDelta {
    /// The zero vector.
    pub const ZERO: ColorDelta = ColorDelta([0; DELTA_COMPONENTS]);

    /// Create a delta from its components.
    #[inline]
    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self([r, g, b, a])
    }

    /// Sum of squared components.
    ///
    /// Squares are taken in 64-bit so the sum cannot overflow. The scale is
    /// only meaningful relative to other magnitudes or to a threshold.
    ///
    /// # Example
    /// ```
    /// use lossy_filter::ColorDelta;
    /// assert_eq!(ColorDelta::new(3, -4, 0, 0).magnitude(), 25);
    /// ```
    #[inline]
    pub fn magnitude(&self) -> u64 {
        self.0
            .iter()
            .map(|&c| (c as i64 * c as i64) as u64)
            .sum()
    }
}

impl Add for ColorDelta {
    type Output = ColorDelta;

    /// Component-wise sum.
    #[inline]
    fn add(self, rhs: ColorDelta) -> ColorDelta {
        let mut out = self;
        for (o, c) in out.0.iter_mut().zip(rhs.0) {
            *o += c;
        }
        out
    }
}

impl Index<usize> for ColorDelta {
    type Output = i32;

    #[inline]
    fn index(&self, index: usize) -> &i32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for ColorDelta {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut i32 {
        &mut self.0[index]
    }
}
