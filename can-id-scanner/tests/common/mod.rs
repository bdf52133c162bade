//! MF4 bus logs for integration tests
//!
//! Logs are written with `mdf4_rs::MdfWriter`. Every frame group becomes one
//! channel group with a `Timestamp` master channel, `<prefix>.ID` and (unless
//! disabled) `<prefix>.IDE`.

#![allow(dead_code)]

use mdf4_rs::writer::VecWriter;
use mdf4_rs::{DataType, DecodedValue, MdfWriter};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A channel group holding CAN frames
#[derive(Debug, Clone)]
pub struct FrameGroup {
    prefix: String,
    ide_channel: bool,
    wide_ids: bool,
    frames: Vec<(u64, bool)>,
}

impl FrameGroup {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            ide_channel: true,
            wide_ids: false,
            frames: Vec::new(),
        }
    }

    /// Leave out the `.IDE` channel
    pub fn without_ide(mut self) -> Self {
        self.ide_channel = false;
        self
    }

    /// Store the ID channel as a 64-bit integer
    pub fn wide_ids(mut self) -> Self {
        self.wide_ids = true;
        self
    }

    pub fn frame(mut self, raw: u64, ide: bool) -> Self {
        self.frames.push((raw, ide));
        self
    }
}

#[derive(Debug, Clone)]
enum Group {
    Frames(FrameGroup),
    Signal { name: String, values: Vec<f64> },
}

/// Builds an MF4 image in memory
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    groups: Vec<Group>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(mut self, group: FrameGroup) -> Self {
        self.groups.push(Group::Frames(group));
        self
    }

    /// A group with a single float channel and no CAN identifiers
    pub fn signal(mut self, name: &str, values: &[f64]) -> Self {
        self.groups.push(Group::Signal {
            name: name.to_string(),
            values: values.to_vec(),
        });
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let mut mdf = MdfWriter::from_writer(VecWriter::new());
        mdf.init_mdf_file().unwrap();

        for group in &self.groups {
            let cg = mdf.add_channel_group(None, |_| {}).unwrap();
            let time_ch = mdf
                .add_channel(&cg, None, |ch| {
                    ch.data_type = DataType::UnsignedIntegerLE;
                    ch.name = Some("Timestamp".into());
                    ch.bit_count = 64;
                })
                .unwrap();
            mdf.set_time_channel(&time_ch).unwrap();

            let rows: Vec<Vec<DecodedValue>> = match group {
                Group::Frames(frames) => {
                    let id_ch = mdf
                        .add_channel(&cg, Some(&time_ch), |ch| {
                            ch.data_type = DataType::UnsignedIntegerLE;
                            ch.name = Some(format!("{}.ID", frames.prefix));
                            ch.bit_count = if frames.wide_ids { 64 } else { 32 };
                        })
                        .unwrap();
                    if frames.ide_channel {
                        mdf.add_channel(&cg, Some(&id_ch), |ch| {
                            ch.data_type = DataType::UnsignedIntegerLE;
                            ch.name = Some(format!("{}.IDE", frames.prefix));
                            ch.bit_count = 8;
                        })
                        .unwrap();
                    }

                    frames
                        .frames
                        .iter()
                        .enumerate()
                        .map(|(i, &(raw, ide))| {
                            let mut row = vec![
                                DecodedValue::UnsignedInteger(i as u64 * 1000),
                                DecodedValue::UnsignedInteger(raw),
                            ];
                            if frames.ide_channel {
                                row.push(DecodedValue::UnsignedInteger(u64::from(ide)));
                            }
                            row
                        })
                        .collect()
                }
                Group::Signal { name, values } => {
                    mdf.add_channel(&cg, Some(&time_ch), |ch| {
                        ch.data_type = DataType::FloatLE;
                        ch.name = Some(name.clone());
                        ch.bit_count = 64;
                    })
                    .unwrap();

                    values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| {
                            vec![
                                DecodedValue::UnsignedInteger(i as u64 * 1000),
                                DecodedValue::Float(v),
                            ]
                        })
                        .collect()
                }
            };

            mdf.start_data_block_for_cg(&cg, 0).unwrap();
            for row in &rows {
                mdf.write_record(&cg, row).unwrap();
            }
            mdf.finish_data_block(&cg).unwrap();
        }

        mdf.finalize().unwrap();
        mdf.into_inner().into_inner()
    }
}

/// Write bytes to a temp file with the given extension
pub fn write_temp(bytes: &[u8], suffix: &str) -> (NamedTempFile, PathBuf) {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    let path = file.path().to_path_buf();
    (file, path)
}

/// Minimal J1939 DBC naming one standard and one extended message
pub const J1939_DBC: &str = r#"VERSION ""

NS_ :
    CM_
    BA_DEF_
    BA_
    VAL_

BS_:

BU_: ECU1 ECU2

BO_ 291 EngineData: 8 ECU1
 SG_ EngineSpeed : 0|16@1+ (1,0) [0|8000] "rpm" ECU2

BO_ 2566844672 CCVS: 8 ECU1
 SG_ WheelBasedVehicleSpeed : 8|16@1+ (0.00390625,0) [0|250.996] "km/h" ECU2
"#;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
