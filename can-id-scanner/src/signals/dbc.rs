//! DBC file parser
//!
//! Parses Vector DBC files and extracts the message names for the name database.

use crate::signals::database::MessageDefinition;
use crate::types::{ScanError, Result, EXTENDED_ID_MAX};
use std::path::Path;

/// Bit 31 of a DBC message id marks an extended frame
const DBC_EXTENDED_FLAG: u32 = 0x8000_0000;

/// Pseudo message holding signals that belong to no real message
const INDEPENDENT_SIGNALS_MESSAGE: &str = "VECTOR__INDEPENDENT_SIG_MSG";

/// Parse a DBC file and return message definitions
pub fn parse_dbc_file(path: &Path) -> Result<Vec<MessageDefinition>> {
    log::info!("Parsing DBC file: {:?}", path);

    // Read the DBC file as bytes first (handle non-UTF8 encodings)
    let bytes = std::fs::read(path).map_err(|e| {
        ScanError::DbcParseError(format!("Failed to read file {:?}: {}", path, e))
    })?;

    let dbc_content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            // Latin-1 maps every byte to the code point of the same value
            log::warn!("DBC file is not UTF-8, trying Latin-1 encoding");
            e.into_bytes().iter().map(|&b| b as char).collect()
        }
    };

    // Parse using can-dbc crate
    let dbc = can_dbc::DBC::from_slice(dbc_content.as_bytes()).map_err(|e| {
        ScanError::DbcParseError(format!("Failed to parse DBC file {:?}: {:?}", path, e))
    })?;

    let source_filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.dbc")
        .to_string();

    let messages: Vec<MessageDefinition> = dbc
        .messages()
        .iter()
        .filter(|m| m.message_name() != INDEPENDENT_SIGNALS_MESSAGE)
        .map(|m| convert_message(m, &source_filename))
        .collect();

    log::info!("Parsed {} messages from {:?}", messages.len(), path);

    Ok(messages)
}

/// Convert a can-dbc message to our MessageDefinition
fn convert_message(dbc_msg: &can_dbc::Message, source: &str) -> MessageDefinition {
    let raw = dbc_msg.message_id().0;

    MessageDefinition {
        id: raw & EXTENDED_ID_MAX,
        is_extended: raw & DBC_EXTENDED_FLAG != 0,
        name: dbc_msg.message_name().to_string(),
        source: source.to_string(),
    }
}
