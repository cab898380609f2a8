//! Settings shared by every file in a run.
//!
//! This module provides the [`OptimizeSettings`] struct that carries the
//! command line choices into [`optimize_path`](crate::optimize_path).

use crate::compress::ColorConversion;

/// Default quantization strength.
pub const DEFAULT_STRENGTH: i32 = 20;

/// Default suffix replacing the input extension.
pub const DEFAULT_EXTENSION: &str = "-lossy.png";

/// Configuration for optimizing one or more files.
///
/// # Defaults
///
/// - Conversion: none (keep the decoded layout)
/// - Strength: 20
/// - Extension: `-lossy.png`
/// - oxipng: disabled
/// - Jobs: one per available core
///
/// # Example
///
/// ```
/// use lossypng::{ColorConversion, OptimizeSettings};
///
/// let settings = OptimizeSettings::new()
///     .conversion(ColorConversion::Grayscale)
///     .strength(40)
///     .oxipng(true);
/// assert_eq!(settings.extension, "-lossy.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeSettings {
    /// Color layout to convert to before optimizing.
    pub conversion: ColorConversion,

    /// Quantization strength. Zero is lossless.
    ///
    /// Default: `20`
    pub strength: i32,

    /// Suffix that replaces the input file's extension to form the output name.
    ///
    /// Default: `-lossy.png`
    pub extension: String,

    /// Re-compress the encoded PNG losslessly with oxipng.
    ///
    /// Default: `false`
    pub oxipng: bool,

    /// Worker count for batches. `None` uses the available parallelism.
    pub jobs: Option<usize>,
}

impl Default for OptimizeSettings {
    fn default() -> Self {
        Self {
            conversion: ColorConversion::None,
            strength: DEFAULT_STRENGTH,
            extension: DEFAULT_EXTENSION.to_string(),
            oxipng: false,
            jobs: None,
        }
    }
}

impl OptimizeSettings {
    /// Create settings with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn conversion(mut self, conversion: ColorConversion) -> Self {
        self.conversion = conversion;
        self
    }

    #[inline]
    pub fn strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[inline]
    pub fn oxipng(mut self, enabled: bool) -> Self {
        self.oxipng = enabled;
        self
    }

    /// Set the worker count. Zero is treated as one.
    #[inline]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs.max(1));
        self
    }

    /// Workers to use for `file_count` files.
    pub fn worker_count(&self, file_count: usize) -> usize {
        let available = self
            .jobs
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1);
        available.min(file_count).max(1)
    }
}
