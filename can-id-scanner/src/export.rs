//! CSV export of report rows

use crate::report::ReportRow;
use crate::types::{Result, ScanError};
use serde::Serialize;
use std::path::Path;

/// Column titles of the exported file
pub const CSV_HEADER: [&str; 5] = [
    "CAN_ID (Hex)",
    "CAN_ID (Dec)",
    "Type",
    "PGN",
    "Message Name",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    can_id_hex: &'a str,
    can_id_dec: u32,
    frame_type: &'a str,
    pgn: Option<u32>,
    message_name: &'a str,
}

impl<'a> From<&'a ReportRow> for CsvRow<'a> {
    fn from(row: &'a ReportRow) -> Self {
        Self {
            can_id_hex: &row.can_id_hex,
            can_id_dec: row.can_id_dec,
            frame_type: row.frame_type.label(),
            pgn: row.pgn,
            message_name: row.display_name(),
        }
    }
}

/// Render rows as CSV
///
/// The header is always written, so an empty report yields a header-only
/// file. A missing PGN is an empty field.
pub fn to_csv_bytes(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(export_error)?;
    for row in rows {
        writer.serialize(CsvRow::from(row)).map_err(export_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScanError::ExportError(format!("Failed to flush CSV writer: {}", e)))
}

/// Write rows to a CSV file
///
/// The whole file is rendered first, so a failure never leaves a partial file
/// behind.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let bytes = to_csv_bytes(rows)?;
    std::fs::write(path, bytes).map_err(|e| {
        ScanError::ExportError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    log::info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

fn export_error(e: csv::Error) -> ScanError {
    ScanError::ExportError(format!("Failed to write CSV record: {}", e))
}
