//! Color types and the perceptual difference metric
//!
//! - [`Rgba`]: straight 8-bit color, as stored in a PNG palette
//! - [`ColorDelta`]: signed 4-component error vector
//! - [`perceptual_difference`]: redmean-weighted difference of two colors
//!
//! # Example
//!
//! ```
//! use lossy_filter::{perceptual_difference, Rgba};
//!
//! let near = perceptual_difference(Rgba::opaque(250, 250, 250), Rgba::opaque(255, 255, 255));
//! let far = perceptual_difference(Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255));
//! assert!(near.magnitude() < far.magnitude());
//! ```

mod delta;
mod distance;
mod rgba;

pub use delta::{ColorDelta, DELTA_COMPONENTS};
pub use distance::perceptual_difference;
pub use rgba::{Rgba, FULL_SCALE};
