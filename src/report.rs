//! Per-file compression summary.

use std::fmt;
use std::path::{Path, PathBuf};

const SIZE_SUFFIXES: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Sizes of one input/output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
}

impl CompressionReport {
    /// Output size as a rounded percentage of the input size.
    ///
    /// `None` for an empty input.
    pub fn percentage(&self) -> Option<u64> {
        if self.input_size == 0 {
            return None;
        }
        Some((self.output_size * 100 + self.input_size / 2) / self.input_size)
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percentage = match self.percentage() {
            Some(p) => format!("{p}%"),
            None => "???%".to_string(),
        };
        write!(
            f,
            "compressed {} ({}) to {} ({}, {})",
            file_name(&self.input),
            size_desc(self.input_size),
            file_name(&self.output),
            size_desc(self.output_size),
            percentage
        )
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Human-readable byte count, e.g. `48kB`.
///
/// Scales by 1000 (rounding) while the value is 10000 or more.
pub fn size_desc(size: u64) -> String {
    let mut size = size;
    let mut unit = 0;
    while unit + 1 < SIZE_SUFFIXES.len() && size >= 10_000 {
        size = (size + 500) / 1000;
        unit += 1;
    }
    format!("{size}{}", SIZE_SUFFIXES[unit])
}
