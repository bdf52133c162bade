//! Core types for the CAN ID scanner library
//!
//! This module defines the identifiers, records and errors shared by the log
//! reader, the name resolver and the report builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Largest identifier representable in a standard (11-bit) frame
pub const STANDARD_ID_MAX: u32 = 0x7FF;

/// Largest identifier representable in an extended (29-bit) frame
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

/// A CAN identifier as observed in a log file
///
/// Two frames with the same numeric id but a different IDE bit are distinct
/// identifiers on the bus and are kept apart. Ordering is by `raw_id`, with the
/// standard frame first on an exact tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanIdentifier {
    /// Numeric identifier (11-bit or 29-bit, not validated)
    pub raw_id: u32,
    /// True if the frame was logged with the IDE (extended) flag
    pub is_extended: bool,
}

impl CanIdentifier {
    /// Create an identifier for a standard (11-bit) frame
    pub fn standard(raw_id: u32) -> Self {
        Self {
            raw_id,
            is_extended: false,
        }
    }

    /// Create an identifier for an extended (29-bit) frame
    pub fn extended(raw_id: u32) -> Self {
        Self {
            raw_id,
            is_extended: true,
        }
    }

    /// Frame type derived from the IDE flag
    pub fn frame_type(&self) -> FrameType {
        if self.is_extended {
            FrameType::Extended
        } else {
            FrameType::Standard
        }
    }

    /// Whether `raw_id` fits the width implied by the frame type
    pub fn is_in_range(&self) -> bool {
        match self.frame_type() {
            FrameType::Standard => self.raw_id <= STANDARD_ID_MAX,
            FrameType::Extended => self.raw_id <= EXTENDED_ID_MAX,
        }
    }
}

impl fmt::Display for CanIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X} ({})", self.raw_id, self.frame_type())
    }
}

/// CAN frame type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FrameType {
    /// 11-bit identifier
    Standard,
    /// 29-bit identifier
    Extended,
}

impl FrameType {
    /// Report label for this frame type
    pub fn label(&self) -> &'static str {
        match self {
            FrameType::Standard => "Standard (11-bit)",
            FrameType::Extended => "Extended (29-bit)",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of bus event an identifier channel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    /// Regular data frame
    Data,
    /// Remote transmission request
    Remote,
    /// Error frame (the id is the one being transmitted when the error hit)
    Error,
}

/// One unique identifier of a log, with its resolved message name
///
/// Created once per unique identifier and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanFrameRecord {
    /// The identifier as observed in the log
    pub id: CanIdentifier,
    /// Message name from the signal database (if available)
    pub message_name: Option<String>,
}

impl CanFrameRecord {
    /// Create a record
    pub fn new(id: CanIdentifier, message_name: Option<String>) -> Self {
        Self { id, message_name }
    }

    /// Message name, or `None` when nothing resolved
    pub fn name(&self) -> Option<&str> {
        self.message_name.as_deref()
    }
}

/// Errors that can occur while scanning a log
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Log file not found: {0}")]
    LogNotFound(PathBuf),

    #[error("Failed to parse log file: {0}")]
    LogParseError(String),

    #[error("Unsupported log format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse DBC file: {0}")]
    DbcParseError(String),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Failed to export report: {0}")]
    ExportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
