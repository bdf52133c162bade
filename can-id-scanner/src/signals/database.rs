//! Message name database
//!
//! Combines the message definitions of one or more DBC files into a single
//! lookup table keyed by 29-bit identifier.

use crate::signals::NameResolver;
use crate::types::CanIdentifier;
use std::collections::HashMap;

/// A CAN message definition as far as naming is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    /// CAN message ID without the DBC extended flag
    pub id: u32,
    /// True if the DBC marks the message as extended (bit 31 of the DBC id)
    pub is_extended: bool,
    /// Message name
    pub name: String,
    /// Source file (DBC filename)
    pub source: String,
}

/// Unified message database
#[derive(Debug, Default)]
pub struct SignalDatabase {
    messages: HashMap<u32, MessageDefinition>,
    sources: Vec<String>,
}

/// Statistics about the loaded database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatabaseStats {
    /// Number of distinct message ids
    pub num_messages: usize,
    /// Number of those flagged as extended
    pub num_extended: usize,
    /// Number of files loaded
    pub num_files: usize,
}

impl SignalDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message definition
    ///
    /// The first definition of an id wins; later duplicates are dropped with a
    /// warning.
    pub fn add_message(&mut self, message: MessageDefinition) {
        if let Some(existing) = self.messages.get(&message.id) {
            log::warn!(
                "Duplicate definition for CAN ID 0x{:X}: keeping '{}' from {}, \
                 ignoring '{}' from {}",
                message.id,
                existing.name,
                existing.source,
                message.name,
                message.source
            );
            return;
        }
        self.messages.insert(message.id, message);
    }

    /// Record that a file contributed to the database
    pub fn add_source(&mut self, source: impl Into<String>) {
        self.sources.push(source.into());
    }

    /// Look up a message by 29-bit id
    pub fn get_message(&self, id: u32) -> Option<&MessageDefinition> {
        self.messages.get(&id)
    }

    /// True if nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get database statistics
    pub fn stats(&self) -> DatabaseStats {
        DatabaseStats {
            num_messages: self.messages.len(),
            num_extended: self.messages.values().filter(|m| m.is_extended).count(),
            num_files: self.sources.len(),
        }
    }
}

impl NameResolver for SignalDatabase {
    fn resolve(&self, id: CanIdentifier) -> Option<&str> {
        self.get_message(id.raw_id).map(|m| m.name.as_str())
    }
}
