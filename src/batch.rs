//! File-level pipeline: read, decode, compress, encode, write.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::compress::compress;
use crate::decode::decode;
use crate::encode::encode;
use crate::error::LossyError;
use crate::report::CompressionReport;
use crate::settings::OptimizeSettings;

/// Output path for `input`: the last extension is replaced by `suffix`.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use lossypng::output_path;
///
/// assert_eq!(output_path(Path::new("img/cat.png"), "-lossy.png"), PathBuf::from("img/cat-lossy.png"));
/// assert_eq!(output_path(Path::new("README"), ".png"), PathBuf::from("README.png"));
/// ```
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    input.with_file_name(name)
}

/// Optimize one file and write the result beside it.
///
/// Errors carry the input path.
pub fn optimize_path(
    input: &Path,
    settings: &OptimizeSettings,
) -> Result<CompressionReport, LossyError> {
    run(input, settings).map_err(|e| e.in_file(input))
}

fn run(input: &Path, settings: &OptimizeSettings) -> Result<CompressionReport, LossyError> {
    let bytes = fs::read(input)?;
    let bitmap = decode(&bytes)?;
    tracing::debug!(
        path = %input.display(),
        width = bitmap.width(),
        height = bitmap.height(),
        "Decoded input"
    );

    let compressed = compress(bitmap, settings.conversion, settings.strength)?;
    let encoded = encode(&compressed, settings.oxipng)?;

    let output = output_path(input, &settings.extension);
    fs::write(&output, &encoded)?;

    Ok(CompressionReport {
        input: input.to_path_buf(),
        output,
        input_size: bytes.len() as u64,
        output_size: encoded.len() as u64,
    })
}

/// Optimize every path on a bounded worker pool.
///
/// Files are independent: one failure does not stop the others. Results come
/// back in input order.
pub fn optimize_paths(
    paths: &[PathBuf],
    settings: &OptimizeSettings,
) -> Result<Vec<Result<CompressionReport, LossyError>>, LossyError> {
    let workers = settings.worker_count(paths.len());
    tracing::info!(files = paths.len(), workers, "Starting batch");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    Ok(pool.install(|| {
        paths
            .par_iter()
            .map(|path| optimize_path(path, settings))
            .collect()
    }))
}
