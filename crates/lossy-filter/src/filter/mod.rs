//! The two optimizers and the PNG predictors they target.
//!
//! | Optimizer | Buffer | Predictor | Diffusion |
//! |-----------|--------|-----------|-----------|
//! | [`optimize_for_average_filter`] | gray, gray+alpha, RGB, RGBA bytes | Average | Sierra (÷32) |
//! | [`optimize_for_paeth_filter`] | palette indices | Paeth | Floyd-Steinberg (÷16) |
//!
//! Both rewrite the caller's buffer in place, in raster order, and never
//! touch row 0 or column 0.

mod average;
mod paeth;
mod predict;

pub use average::optimize_for_average_filter;
pub use paeth::{optimize_for_paeth_filter, MAX_PALETTE_LEN};
pub use predict::{average_predictor, paeth_predictor};
