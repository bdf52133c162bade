//! CAN ID Scanner Library
//!
//! Lists the unique CAN identifiers recorded in MF4 bus logs, classifies them
//! as standard or extended frames, derives the J1939 PGN of extended frames
//! and names them from DBC files.
//!
//! # Architecture
//!
//! - `formats` reads a log file into a set of unique identifiers
//! - `signals` loads DBC files and resolves identifiers to message names
//! - `classify` and `pgn` derive the report columns of one identifier
//! - `report` orders the rows and `export` writes them as CSV
//!
//! The library does NOT decode signal values or timestamps; it only looks at
//! identifiers. Console rendering and argument handling live in the
//! application layer (can-id-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use can_id_scanner::{Scanner, ScanConfig, SortKey};
//! use std::path::Path;
//!
//! let mut scanner = Scanner::with_config(ScanConfig::new().with_error_frames(false));
//! scanner.add_dbc(Path::new("j1939.dbc")).unwrap();
//!
//! let rows = scanner.report(Path::new("trace.mf4"), SortKey::Name).unwrap();
//! for row in &rows {
//!     println!("{} {} {}", row.can_id_hex, row.frame_type, row.display_name());
//! }
//!
//! can_id_scanner::write_csv(Path::new("trace_can_ids.csv"), &rows).unwrap();
//! ```

// Public modules
pub mod classify;
pub mod config;
pub mod export;
pub mod formats;
pub mod pgn;
pub mod report;
pub mod scanner;
pub mod signals;
pub mod types;

// Re-export main types for convenience
pub use classify::{classify, format_hex, Classification};
pub use config::ScanConfig;
pub use export::{to_csv_bytes, write_csv, CSV_HEADER};
pub use formats::{open_log_source, LogSource, Mf4LogSource};
pub use pgn::{extract_pgn, pgn_for};
pub use report::{build_report, ReportRow, SortKey, MISSING_NAME};
pub use scanner::{resolve_records, Scanner};
pub use signals::{DatabaseStats, NameResolver, SignalDatabase};
pub use types::{CanFrameRecord, CanIdentifier, FrameKind, FrameType, Result, ScanError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
