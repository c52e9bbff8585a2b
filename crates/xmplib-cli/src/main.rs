/// xmplib command-line tool — dump, summarise, and check XMPlay library
/// files.
///
/// # Command overview
///
/// ```text
/// xmplib <COMMAND> [OPTIONS]
///
/// Commands:
///   dump       Write the track listing as CSV or JSON Lines
///   meta       Print library version, encoding and watched directories
///   validate   Decode the whole file and report structural problems
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder progress to stderr
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// `RUST_LOG` overrides the log level chosen by `--verbose`.
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xmplib_decoder::LibraryDecoder;

mod cmd_dump;
mod cmd_meta;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Reader for XMPlay media library files.
#[derive(Parser)]
#[command(name = "xmplib", version, about = "XMPlay library reader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder progress (header, section boundaries) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Write the track listing as CSV or JSON Lines.
    Dump(DumpArgs),
    /// Print library version, encoding and watched directories.
    Meta(MetaArgs),
    /// Decode the whole file and report structural problems.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `xmplib dump`.
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                               │
/// ├──────────────┼──────────────────────────────────────────────────────┤
/// │ --format     │ csv (default) | jsonl                                │
/// │ --no-header  │ Omit the CSV column-name line                        │
/// │ --utc        │ Show timestamps in UTC instead of local time         │
/// │ -o/--output  │ Write to a file instead of stdout                    │
/// └──────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Path to the library file.
    pub file: PathBuf,

    /// Output format: `csv` or `jsonl`.
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Do not print the CSV header row.
    #[arg(long)]
    pub no_header: bool,

    /// Format timestamps in UTC.
    #[arg(long)]
    pub utc: bool,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `xmplib meta`.
///
/// The track listing sits between the header and the watch directories,
/// so it is decoded (and discarded) to reach them.
#[derive(clap::Args)]
pub struct MetaArgs {
    /// Path to the library file.
    pub file: PathBuf,

    /// Format timestamps in UTC.
    #[arg(long)]
    pub utc: bool,
}

/// Arguments for `xmplib validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the library file.
    pub file: PathBuf,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Open `path` and read its header.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the header is
/// rejected.
pub(crate) fn open_library(path: &Path) -> Result<LibraryDecoder<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    LibraryDecoder::new(BufReader::new(file))
        .with_context(|| format!("{} is not an XMPlay library", path.display()))
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Dump(args) => cmd_dump::run(&args),
        Commands::Meta(args) => cmd_meta::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
