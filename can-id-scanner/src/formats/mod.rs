//! Log file format readers
//!
//! Each reader turns a measurement file into the set of unique CAN
//! identifiers it contains. Only MF4 is supported.

use crate::config::ScanConfig;
use crate::types::{CanIdentifier, Result, ScanError};
use std::collections::BTreeSet;
use std::path::Path;

pub mod mf4;

pub use mf4::{Mf4LogSource, Mf4Scan};

/// A source of CAN identifiers
///
/// Implementations read one log file and report every identifier that
/// appears in it at least once.
pub trait LogSource {
    /// Read the unique identifiers of a log file
    fn read_unique_frames(&self, path: &Path) -> Result<BTreeSet<CanIdentifier>>;
}

/// Pick a log source by file extension
///
/// A missing file is reported as such before its extension is looked at.
pub fn open_log_source(path: &Path, config: &ScanConfig) -> Result<Box<dyn LogSource>> {
    if !path.exists() {
        return Err(ScanError::LogNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mf4" | "mdf" => Ok(Box::new(Mf4LogSource::new(config.clone()))),
        "" => Err(ScanError::UnsupportedFormat(format!(
            "{} has no file extension",
            path.display()
        ))),
        other => Err(ScanError::UnsupportedFormat(format!(
            "'.{}' files are not supported (expected .mf4)",
            other
        ))),
    }
}
