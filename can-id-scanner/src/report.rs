//! Report building
//!
//! Turns resolved records into classified report rows in a deterministic order.

use crate::classify::classify;
use crate::pgn::pgn_for;
use crate::types::{CanFrameRecord, CanIdentifier, FrameType, ScanError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for identifiers without a resolved name
pub const MISSING_NAME: &str = "N/A";

/// Report ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending numeric identifier
    #[default]
    Id,
    /// Ascending message name, unnamed identifiers last
    Name,
}

impl FromStr for SortKey {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            other => Err(ScanError::InvalidSortKey(format!(
                "'{}' (expected 'id' or 'name')",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => f.write_str("id"),
            SortKey::Name => f.write_str("name"),
        }
    }
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Identifier the row was built from
    pub id: CanIdentifier,
    pub can_id_hex: String,
    pub can_id_dec: u32,
    pub frame_type: FrameType,
    /// J1939 PGN, extended frames only
    pub pgn: Option<u32>,
    pub message_name: Option<String>,
}

impl ReportRow {
    /// Classify a record into a row
    pub fn from_record(record: &CanFrameRecord) -> Self {
        let classification = classify(record.id.raw_id, record.id.is_extended);
        Self {
            id: record.id,
            can_id_hex: classification.hex,
            can_id_dec: record.id.raw_id,
            frame_type: classification.frame_type,
            pgn: pgn_for(record.id),
            message_name: record.message_name.clone(),
        }
    }

    /// Message name, or `N/A`
    pub fn display_name(&self) -> &str {
        self.message_name.as_deref().unwrap_or(MISSING_NAME)
    }
}

/// Build the report rows for a set of records
///
/// Records with the same identifier collapse into one row; the first one
/// wins. The input is left untouched.
pub fn build_report(records: &[CanFrameRecord], sort_key: SortKey) -> Vec<ReportRow> {
    let mut seen = HashSet::new();
    let mut rows: Vec<ReportRow> = records
        .iter()
        .filter(|r| seen.insert(r.id))
        .map(ReportRow::from_record)
        .collect();

    match sort_key {
        SortKey::Id => rows.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::Name => rows.sort_by(compare_by_name),
    }

    log::debug!("Built report with {} rows sorted by {}", rows.len(), sort_key);
    rows
}

fn compare_by_name(a: &ReportRow, b: &ReportRow) -> Ordering {
    let by_name = match (&a.message_name, &b.message_name) {
        (Some(x), Some(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_name.then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn std_record(raw_id: u32, name: Option<&str>) -> CanFrameRecord {
        CanFrameRecord::new(CanIdentifier::standard(raw_id), name.map(String::from))
    }

    fn hex_ids(rows: &[ReportRow]) -> Vec<&str> {
        rows.iter().map(|r| r.can_id_hex.as_str()).collect()
    }

    #[test]
    fn test_sort_by_id() {
        let records = vec![
            std_record(0x200, None),
            std_record(0x100, None),
            std_record(0x7FF, None),
        ];
        let rows = build_report(&records, SortKey::Id);
        assert_eq!(hex_ids(&rows), vec!["0x100", "0x200", "0x7FF"]);
    }

    #[test]
    fn test_sort_by_name_puts_unnamed_last() {
        let records = vec![
            std_record(0x100, Some("EngineSpeed")),
            std_record(0x101, None),
            std_record(0x102, Some("Brake")),
        ];
        let rows = build_report(&records, SortKey::Name);
        let names: Vec<&str> = rows.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["Brake", "EngineSpeed", "N/A"]);
    }

    #[test]
    fn test_sort_by_name_ties_fall_back_to_id() {
        let records = vec![
            std_record(0x300, None),
            std_record(0x120, Some("Same")),
            std_record(0x100, None),
            std_record(0x110, Some("Same")),
        ];
        let rows = build_report(&records, SortKey::Name);
        assert_eq!(hex_ids(&rows), vec!["0x110", "0x120", "0x100", "0x300"]);
    }

    #[test]
    fn test_name_sort_is_byte_wise() {
        let records = vec![std_record(1, Some("abs")), std_record(2, Some("Brake"))];
        let rows = build_report(&records, SortKey::Name);
        // uppercase sorts before lowercase
        assert_eq!(rows[0].display_name(), "Brake");
    }

    #[test]
    fn test_duplicates_collapse_first_wins() {
        let records = vec![
            std_record(0x100, Some("First")),
            std_record(0x100, Some("Second")),
            std_record(0x200, None),
        ];
        let rows = build_report(&records, SortKey::Id);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display_name(), "First");
    }

    #[test]
    fn test_same_number_different_ide_are_distinct() {
        let records = vec![
            CanFrameRecord::new(CanIdentifier::extended(0x100), None),
            CanFrameRecord::new(CanIdentifier::standard(0x100), None),
        ];
        let rows = build_report(&records, SortKey::Id);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frame_type, FrameType::Standard);
        assert_eq!(rows[1].frame_type, FrameType::Extended);
    }

    #[test]
    fn test_row_columns() {
        let records = vec![
            CanFrameRecord::new(CanIdentifier::extended(0x18FEF100), Some("CCVS".into())),
            std_record(0x123, None),
        ];
        let rows = build_report(&records, SortKey::Id);

        assert_eq!(rows[0].can_id_hex, "0x123");
        assert_eq!(rows[0].can_id_dec, 291);
        assert_eq!(rows[0].frame_type, FrameType::Standard);
        assert_eq!(rows[0].pgn, None);
        assert_eq!(rows[0].display_name(), "N/A");

        assert_eq!(rows[1].can_id_hex, "0x18FEF100");
        assert_eq!(rows[1].can_id_dec, 419361024);
        assert_eq!(rows[1].frame_type, FrameType::Extended);
        assert_eq!(rows[1].pgn, Some(65265));
        assert_eq!(rows[1].display_name(), "CCVS");
    }

    #[test]
    fn test_report_is_deterministic() {
        let records = vec![
            std_record(0x300, Some("B")),
            std_record(0x100, None),
            std_record(0x200, Some("A")),
        ];
        for key in [SortKey::Id, SortKey::Name] {
            assert_eq!(build_report(&records, key), build_report(&records, key));
        }
    }

    #[test]
    fn test_empty_report() {
        assert!(build_report(&[], SortKey::Name).is_empty());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!("NAME".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!(matches!(
            "time".parse::<SortKey>(),
            Err(ScanError::InvalidSortKey(msg)) if msg.contains("time")
        ));
        assert_eq!(SortKey::default(), SortKey::Id);
    }
}
