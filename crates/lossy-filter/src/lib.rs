//! lossy-filter: Lossy pre-processing for PNG filters
//!
//! PNG compresses the *residuals* left after a row filter predicts each byte
//! from its neighbors. This crate nudges pixel values so those residuals
//! collapse onto a few repeated values, which DEFLATE then compresses far
//! better. The visible error of every nudge is diffused to neighboring
//! pixels, so smooth areas keep their average tone.
//!
//! # Quick Start
//!
//! Direct-color and gray buffers go through the Average-filter optimizer:
//!
//! ```
//! use lossy_filter::{optimize_for_average_filter, Layout};
//!
//! let layout = Layout::packed(4, 4, 4);
//! let mut pixels = vec![200u8; layout.required_len()];
//! optimize_for_average_filter(&mut pixels, layout, 20).unwrap();
//! ```
//!
//! Palette images go through the Paeth-filter optimizer, which only ever
//! writes indices that exist in the palette:
//!
//! ```
//! use lossy_filter::{optimize_for_paeth_filter, Layout, Rgba};
//!
//! let palette = [Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)];
//! let mut indices = vec![0, 1, 1, 0];
//! optimize_for_paeth_filter(&mut indices, Layout::packed(2, 2, 1), 20, &palette).unwrap();
//! assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
//! ```
//!
//! # Quantization Strength
//!
//! `quantization` is the single quality knob:
//!
//! - `0` is lossless: the buffer is returned unchanged.
//! - For the Average filter it is the residual step size in channel units.
//! - For the Paeth filter its square is the perceptual-distance budget for
//!   keeping the predicted index.
//!
//! Larger values trade fidelity for size. Negative values are rejected with
//! [`FilterError::InvalidQuantization`].
//!
//! # Perceptual Distance
//!
//! Colors are compared with a "redmean" weighting over 16-bit channels,
//! see [`perceptual_difference`]. It is cheap, integer-only and good enough
//! to tell which palette entries a viewer would confuse.

pub mod color;
pub mod diffusion;
pub mod error;
pub mod filter;
pub mod layout;


pub use color::{perceptual_difference, ColorDelta, Rgba};
pub use diffusion::{ErrorRing, Kernel, FLOYD_STEINBERG, SIERRA};
pub use error::FilterError;
pub use filter::{
    average_predictor, optimize_for_average_filter, optimize_for_paeth_filter, paeth_predictor,
    MAX_PALETTE_LEN,
};
pub use layout::{Layout, MAX_BYTES_PER_PIXEL};
