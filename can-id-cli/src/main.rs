//! CAN ID Inspector CLI Application
//!
//! This is the command-line interface for the can-id-scanner library.
//! It adds:
//! - Argument parsing and an optional TOML configuration file
//! - Console rendering of the report
//! - CSV output paths

use anyhow::{Context, Result};
use can_id_scanner::{write_csv, Scanner, SortKey};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod output;

const AFTER_HELP: &str = "\
Examples:
  can-id-cli test.mf4
  can-id-cli test.mf4 -d j1939.dbc
  can-id-cli test.mf4 -d j1939.dbc --csv
  can-id-cli test.mf4 -d j1939.dbc --csv output.csv
  can-id-cli test.mf4 --csv --sort name

Notes:
  --csv without a file name writes <log name>_can_ids.csv.
  PGNs are shown for extended (29-bit) frames.";

/// MF4 CAN ID Inspector - List the unique CAN IDs of a measurement file
#[derive(Parser, Debug)]
#[command(name = "can-id-cli")]
#[command(
    about = "List unique CAN IDs from MF4 logs with DBC names, J1939 PGNs and CSV export",
    long_about = None
)]
#[command(version, arg_required_else_help = true, after_help = AFTER_HELP)]
struct Args {
    /// Path to the MF4 log file
    #[arg(value_name = "LOG_FILE")]
    log_file: PathBuf,

    /// Path to DBC file(s) (can be repeated)
    #[arg(short, long, value_name = "FILE")]
    dbc: Vec<PathBuf>,

    /// Write the report as CSV (default name: <log name>_can_ids.csv)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Sort order of the report [default: id]
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ignore identifiers of error frames
    #[arg(long)]
    no_error_frames: bool,

    /// Ignore identifiers of remote frames
    #[arg(long)]
    no_remote_frames: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortOrder {
    /// Ascending CAN ID
    Id,
    /// Message name, unnamed IDs last
    Name,
}

impl From<SortOrder> for SortKey {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Id => SortKey::Id,
            SortOrder::Name => SortKey::Name,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("CAN ID Inspector CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using scanner library v{}", can_id_scanner::VERSION);

    run(&args)
}

/// Load names, scan the log, print the report and export it
fn run(args: &Args) -> Result<()> {
    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let scan_config = app_config.scan_config(args.no_error_frames, args.no_remote_frames);
    let sort_key = app_config.sort_key(args.sort.map(SortKey::from));
    let mut scanner = Scanner::with_config(scan_config);

    // DBCs first so a broken database fails before the log is touched
    for dbc_path in app_config.dbc_files(&args.dbc) {
        scanner
            .add_dbc(&dbc_path)
            .with_context(|| format!("Failed to load DBC file {:?}", dbc_path))?;
    }

    let stats = scanner.database_stats();
    if scanner.has_names() {
        log::info!(
            "Name database: {} messages ({} extended) from {} file(s)",
            stats.num_messages,
            stats.num_extended,
            stats.num_files
        );
    }

    let rows = scanner
        .report(&args.log_file, sort_key)
        .with_context(|| format!("Failed to read log file {:?}", args.log_file))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_console_report(&mut out, &args.log_file, &rows)?;

    if let Some(csv) = &args.csv {
        let csv_path = match csv {
            Some(path) => path.clone(),
            None => {
                output::derive_csv_path(&args.log_file, app_config.output.csv_dir.as_deref())
            }
        };
        write_csv(&csv_path, &rows)
            .with_context(|| format!("Failed to export CSV to {:?}", csv_path))?;
        writeln!(out)?;
        writeln!(out, "Exported CAN ID summary to CSV: {}", csv_path.display())?;
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
