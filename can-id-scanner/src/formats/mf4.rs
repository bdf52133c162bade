//! MF4 (Measurement Data Format 4) log reader
//!
//! Collects the unique CAN identifiers from ASAM MDF4 bus logging files.
//! Bus logging writers store every frame as a record of a channel group with
//! channels such as `CAN_DataFrame.ID` and `CAN_DataFrame.IDE`. Only those
//! two are read; payload bytes, timestamps and bus channel numbers are never
//! decoded. Block parsing, data block chains and invalidation bits are left
//! to `mdf4-rs`.

use crate::config::ScanConfig;
use crate::formats::LogSource;
use crate::types::{CanIdentifier, FrameKind, Result, ScanError, EXTENDED_ID_MAX, STANDARD_ID_MAX};
use mdf4_rs::{Channel, DecodedValue, MDF};
use std::collections::BTreeSet;
use std::path::Path;

/// Bit 31 of a 32-bit ID channel carries the IDE flag in some loggers
const ID_EXTENDED_FLAG: u32 = 0x8000_0000;

/// Result of scanning one MF4 file
#[derive(Debug, Clone, Default)]
pub struct Mf4Scan {
    /// Number of ID channels that were read
    pub id_channels: usize,
    /// Samples dropped because they do not fit 32 bits
    pub rejected_samples: usize,
    /// Unique identifiers found
    pub frames: BTreeSet<CanIdentifier>,
}

/// Log source for MF4 files
#[derive(Debug, Clone, Default)]
pub struct Mf4LogSource {
    config: ScanConfig,
}

impl Mf4LogSource {
    /// Create a reader with the given scan configuration
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan an MF4 file
    pub fn scan(&self, path: &Path) -> Result<Mf4Scan> {
        log::info!("Parsing MF4 file: {:?}", path);

        if !path.exists() {
            return Err(ScanError::LogNotFound(path.to_path_buf()));
        }

        let mdf = MDF::from_file(&path.to_string_lossy()).map_err(|e| parse_error(path, e))?;

        let mut scan = Mf4Scan::default();
        for (index, group) in mdf.channel_groups().iter().enumerate() {
            let members = group.channels();
            let mut channels = Vec::new();
            for channel in members.iter() {
                if let Some(name) = channel.name().map_err(|e| parse_error(path, e))? {
                    channels.push((name, channel));
                }
            }

            let mut found = 0;
            for (name, channel) in &channels {
                let Some(prefix) = id_channel_prefix(name) else {
                    continue;
                };
                let kind = frame_kind(prefix);
                if !self.config.accepts(kind) {
                    log::debug!("Skipping {} ({:?} frames excluded)", name, kind);
                    continue;
                }

                let ide_name = format!("{}.IDE", prefix);
                let ide = channels
                    .iter()
                    .find(|(other, _)| *other == ide_name)
                    .map(|(_, ch)| *ch);

                collect_channel(channel, ide, &mut scan).map_err(|e| parse_error(path, e))?;
                found += 1;
            }

            if found == 0 {
                log::trace!("Channel group {} has no CAN ID channels, skipping", index);
            } else {
                log::debug!("Channel group {}: {} ID channel(s)", index, found);
            }
            scan.id_channels += found;
        }

        if scan.rejected_samples > 0 {
            log::warn!(
                "Ignored {} ID sample(s) in {:?} that do not fit 32 bits",
                scan.rejected_samples,
                path
            );
        }
        log::info!(
            "Found {} unique CAN IDs in {} ID channel(s) of {:?}",
            scan.frames.len(),
            scan.id_channels,
            path
        );
        Ok(scan)
    }
}

impl LogSource for Mf4LogSource {
    fn read_unique_frames(&self, path: &Path) -> Result<BTreeSet<CanIdentifier>> {
        Ok(self.scan(path)?.frames)
    }
}

fn parse_error(path: &Path, error: mdf4_rs::Error) -> ScanError {
    ScanError::LogParseError(format!("{}: {}", path.display(), error))
}

/// Add the samples of one ID channel (and its IDE sibling) to the scan
fn collect_channel(id: &Channel, ide: Option<&Channel>, scan: &mut Mf4Scan) -> mdf4_rs::Result<()> {
    let ids = id.values()?;
    let flags = match ide {
        Some(channel) => channel.values()?,
        None => Vec::new(),
    };

    // invalid samples come back as None
    for (index, sample) in ids.iter().enumerate() {
        let Some(raw) = sample.as_ref().and_then(sample_as_u64) else {
            continue;
        };
        let flag = flags
            .get(index)
            .and_then(|s| s.as_ref())
            .and_then(sample_as_u64);

        match identifier_from_sample(raw, flag) {
            Some(identifier) => {
                if !identifier.is_in_range() && !scan.frames.contains(&identifier) {
                    log::warn!("Identifier {} exceeds the width of its frame type", identifier);
                }
                scan.frames.insert(identifier);
            }
            None => scan.rejected_samples += 1,
        }
    }
    Ok(())
}

/// Prefix of an ID channel name, e.g. `CAN_DataFrame` for `CAN_DataFrame.ID`
///
/// Only an exact `ID` last segment qualifies; `CAN_DataFrame.IDE` does not.
fn id_channel_prefix(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((prefix, "ID")) => Some(prefix),
        _ => None,
    }
}

fn frame_kind(prefix: &str) -> FrameKind {
    if prefix.contains("ErrorFrame") {
        FrameKind::Error
    } else if prefix.contains("RemoteFrame") {
        FrameKind::Remote
    } else {
        FrameKind::Data
    }
}

/// Integer view of a decoded sample
///
/// Negative and fractional values have no identifier meaning.
fn sample_as_u64(value: &DecodedValue) -> Option<u64> {
    match value {
        DecodedValue::UnsignedInteger(v) => Some(*v),
        DecodedValue::SignedInteger(v) => u64::try_from(*v).ok(),
        DecodedValue::Float(v) if v.is_finite() && *v >= 0.0 && v.fract() == 0.0 => {
            (*v < u64::MAX as f64).then_some(*v as u64)
        }
        _ => None,
    }
}

/// Build an identifier from an ID sample and the optional IDE sample
///
/// Returns `None` for samples wider than 32 bits.
fn identifier_from_sample(raw: u64, ide: Option<u64>) -> Option<CanIdentifier> {
    let raw = u32::try_from(raw).ok()?;
    if raw & ID_EXTENDED_FLAG != 0 {
        return Some(CanIdentifier::extended(raw & EXTENDED_ID_MAX));
    }

    let is_extended = match ide {
        Some(flag) => flag != 0,
        None => raw > STANDARD_ID_MAX,
    };
    Some(CanIdentifier {
        raw_id: raw,
        is_extended,
    })
}
