//! J1939 Parameter Group Number extraction
//!
//! A J1939 identifier is laid out as
//! `priority (3) | EDP (1) | DP (1) | PF (8) | PS (8) | SA (8)`.
//! The PGN is the 18 bits between the priority and the source address.

use crate::types::CanIdentifier;

/// Mask applied after dropping the source address byte
pub const PGN_MASK: u32 = 0x3FFFF;

/// Extract the PGN from a 29-bit identifier
///
/// Only meaningful for extended frames. The PDU specific byte is kept as-is,
/// so for PDU1 (PF < 240) messages the destination address stays part of the
/// value.
pub fn extract_pgn(raw_id: u32) -> u32 {
    (raw_id >> 8) & PGN_MASK
}

/// PGN of an identifier, `None` for standard frames
pub fn pgn_for(id: CanIdentifier) -> Option<u32> {
    if id.is_extended {
        Some(extract_pgn(id.raw_id))
    } else {
        None
    }
}
