//! Message name resolution
//!
//! This module contains the DBC parser and the database it fills, plus the
//! `NameResolver` seam the report pipeline depends on.

pub mod database;
pub mod dbc;

use crate::types::CanIdentifier;

// Re-export key types for convenience
pub use database::{DatabaseStats, MessageDefinition, SignalDatabase};

/// Looks up a human-readable message name for an identifier
pub trait NameResolver {
    /// Message name, or `None` when the identifier is unknown
    fn resolve(&self, id: CanIdentifier) -> Option<&str>;
}
