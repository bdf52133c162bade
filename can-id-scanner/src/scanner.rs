//! Main scanner API
//!
//! The Scanner struct is the entry point of the library: it loads DBC files
//! into its name database, reads a log through a `LogSource` and resolves
//! every identifier found into a `CanFrameRecord`.

use crate::config::ScanConfig;
use crate::formats::{open_log_source, LogSource};
use crate::report::{build_report, ReportRow, SortKey, MISSING_NAME};
use crate::signals::{DatabaseStats, NameResolver, SignalDatabase};
use crate::types::{CanFrameRecord, CanIdentifier, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// The main scanner struct - entry point for all scanning operations
#[derive(Debug, Default)]
pub struct Scanner {
    /// Message names loaded from DBC files
    signal_db: SignalDatabase,
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with an empty database and the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with the given configuration
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            signal_db: SignalDatabase::new(),
            config,
        }
    }

    /// Load a DBC file and add its message names to the database
    ///
    /// The file is parsed completely before anything is added, so a file that
    /// fails to parse leaves the database unchanged.
    ///
    /// # Example
    /// ```no_run
    /// use can_id_scanner::Scanner;
    /// use std::path::Path;
    ///
    /// let mut scanner = Scanner::new();
    /// scanner.add_dbc(Path::new("j1939.dbc")).unwrap();
    /// ```
    pub fn add_dbc(&mut self, path: &Path) -> Result<()> {
        log::info!("Loading DBC file: {:?}", path);

        let messages = crate::signals::dbc::parse_dbc_file(path)?;
        for message in messages {
            self.signal_db.add_message(message);
        }
        self.signal_db.add_source(path.display().to_string());

        log::info!("DBC file loaded successfully: {:?}", path);
        Ok(())
    }

    /// Get statistics about the loaded name database
    pub fn database_stats(&self) -> DatabaseStats {
        self.signal_db.stats()
    }

    /// True once a loaded DBC contributed at least one message name
    pub fn has_names(&self) -> bool {
        !self.signal_db.is_empty()
    }

    /// Scan a log file, picking the reader from its extension
    ///
    /// Records come back in identifier order.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<CanFrameRecord>> {
        let source = open_log_source(path, &self.config)?;
        self.scan_with(source.as_ref(), path)
    }

    /// Scan a log file with a specific reader
    pub fn scan_with<S: LogSource + ?Sized>(
        &self,
        source: &S,
        path: &Path,
    ) -> Result<Vec<CanFrameRecord>> {
        log::info!("Scanning log file: {:?}", path);
        if !self.has_names() {
            log::info!("No message names loaded; names are reported as {}", MISSING_NAME);
        }
        let frames = source.read_unique_frames(path)?;
        Ok(resolve_records(&frames, &self.signal_db))
    }

    /// Scan a log file and build its sorted report
    pub fn report(&self, path: &Path, sort_key: SortKey) -> Result<Vec<ReportRow>> {
        let records = self.scan_file(path)?;
        Ok(build_report(&records, sort_key))
    }
}

/// Attach message names to a set of identifiers
pub fn resolve_records<R: NameResolver + ?Sized>(
    frames: &BTreeSet<CanIdentifier>,
    resolver: &R,
) -> Vec<CanFrameRecord> {
    let records: Vec<CanFrameRecord> = frames
        .iter()
        .map(|&id| CanFrameRecord::new(id, resolver.resolve(id).map(str::to_string)))
        .collect();

    let resolved = records.iter().filter(|r| r.message_name.is_some()).count();
    log::debug!("Resolved names for {} of {} identifiers", resolved, records.len());
    records
}
