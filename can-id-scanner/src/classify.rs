//! Frame classification
//!
//! Turns a raw identifier and its IDE flag into the three report columns that
//! describe it: hexadecimal id, decimal id and frame type.

use crate::types::FrameType;

/// Rendered form of a classified identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `0x` followed by uppercase hex digits, no padding (e.g. `0x18FEF100`)
    pub hex: String,
    /// Base-10 rendering
    pub decimal: String,
    /// Frame type taken from the IDE flag
    pub frame_type: FrameType,
}

/// Classify a raw identifier
///
/// The frame type comes only from `is_extended`, never from the magnitude of
/// `raw_id`. Identifiers outside the range of their declared type are passed
/// through unchanged.
pub fn classify(raw_id: u32, is_extended: bool) -> Classification {
    let frame_type = if is_extended {
        FrameType::Extended
    } else {
        FrameType::Standard
    };

    Classification {
        hex: format_hex(raw_id),
        decimal: raw_id.to_string(),
        frame_type,
    }
}

/// Hex rendering used in every report column
pub fn format_hex(raw_id: u32) -> String {
    format!("0x{:X}", raw_id)
}
