//! Console rendering and output paths

use can_id_scanner::ReportRow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Print the report in its console form
///
/// ```text
/// Unique CAN IDs in: trace.mf4 (2 total)
///
///   0x123  (Standard (11-bit))  → EngineData
///   0x18FEF100  (Extended (29-bit))  → CCVS [PGN 65265]
/// ```
pub fn write_console_report<W: Write>(
    out: &mut W,
    log_path: &Path,
    rows: &[ReportRow],
) -> io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "No CAN IDs found in: {}", log_path.display())?;
        return Ok(());
    }

    writeln!(out, "Unique CAN IDs in: {} ({} total)", log_path.display(), rows.len())?;
    writeln!(out)?;
    for row in rows {
        writeln!(out, "{}", console_line(row))?;
    }
    Ok(())
}

fn console_line(row: &ReportRow) -> String {
    let mut line = format!("  {}  ({})", row.can_id_hex, row.frame_type);
    if let Some(name) = &row.message_name {
        line.push_str("  → ");
        line.push_str(name);
    }
    if let Some(pgn) = row.pgn {
        line.push_str(&format!(" [PGN {}]", pgn));
    }
    line
}

/// File name used by `--csv` without a value: `<log stem>_can_ids.csv`
pub fn derive_csv_path(log_path: &Path, csv_dir: Option<&Path>) -> PathBuf {
    let stem = log_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log".to_string());
    let file_name = format!("{}_can_ids.csv", stem);

    match csv_dir {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
