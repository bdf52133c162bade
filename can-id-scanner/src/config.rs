//! Scanner configuration types
//!
//! Controls which identifier channels of a log contribute to the report.

use crate::types::FrameKind;
use serde::{Deserialize, Serialize};

/// Configuration for scanning a log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Collect identifiers from error frame groups
    #[serde(default = "default_true")]
    pub include_error_frames: bool,

    /// Collect identifiers from remote frame groups
    #[serde(default = "default_true")]
    pub include_remote_frames: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_error_frames: true,
            include_remote_frames: true,
        }
    }
}

impl ScanConfig {
    /// Create a new configuration with default settings (every frame kind)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: include or skip error frames
    pub fn with_error_frames(mut self, enabled: bool) -> Self {
        self.include_error_frames = enabled;
        self
    }

    /// Builder method: include or skip remote frames
    pub fn with_remote_frames(mut self, enabled: bool) -> Self {
        self.include_remote_frames = enabled;
        self
    }

    /// Check if identifiers of the given frame kind should be collected
    pub fn accepts(&self, kind: FrameKind) -> bool {
        match kind {
            FrameKind::Data => true,
            FrameKind::Remote => self.include_remote_frames,
            FrameKind::Error => self.include_error_frames,
        }
    }
}
