use std::path::PathBuf;

use lossy_filter::FilterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LossyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Optimizer error: {0}")]
    Filter(#[from] FilterError),

    #[error("Pixel data has {actual} bytes, {width}x{height} needs {expected}")]
    PixelCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<LossyError>,
    },
}

impl LossyError {
    /// Attach the file being processed.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        LossyError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
