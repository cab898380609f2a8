//! lossypng - lossy pre-processing for smaller PNG files
//!
//! Decodes an image, quantizes it with [`lossy_filter`] so the PNG row
//! filters leave highly repetitive residuals, and writes a regular PNG that
//! any decoder can read. The engine itself lives in the `lossy-filter`
//! crate; this crate adds the file pipeline around it.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use lossypng::{optimize_path, OptimizeSettings};
//!
//! let report = optimize_path(Path::new("screenshot.png"), &OptimizeSettings::new())?;
//! println!("{report}");
//! # Ok::<(), lossypng::LossyError>(())
//! ```

pub mod batch;
pub mod bitmap;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod report;
pub mod settings;

pub use batch::{optimize_path, optimize_paths, output_path};
pub use bitmap::{Bitmap, PixelData};
pub use compress::{compress, ColorConversion};
pub use decode::decode;
pub use encode::encode;
pub use error::LossyError;
pub use report::{size_desc, CompressionReport};
pub use settings::OptimizeSettings;
