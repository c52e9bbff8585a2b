/// Implementation of `xmplib validate`.
///
/// Decodes the header, the full track listing and the full watch-directory
/// listing, then counts any bytes left after the final sentinel. Prints a
/// series of success checkmarks (`✓`) or a diagnostic failure line (`✗`).
///
/// # Success output
///
/// ```text
/// ✓ Header: valid (version 1, ascii)
/// ✓ Tracks: 1532 records decoded
/// ✓ Watch directories: 2 entries decoded
/// ✓ Trailing data: none
/// ```
///
/// Trailing bytes are reported with a `!` line but do not fail
/// validation; XMPlay never reads past the watch-directory sentinel.
///
/// # Failure output
///
/// ```text
/// ✗ Error: truncated while reading play_count: unexpected end of input at offset 8812: needed 4 bytes, got 1
/// ```
use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result, anyhow};
use xmplib_decoder::{DecodeError, LibraryDecoder};

use crate::ValidateArgs;

/// Run the `xmplib validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails any structural
/// check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;

    match check(BufReader::new(file)) {
        Ok(report) => {
            println!(
                "✓ Header: valid (version {}, {})",
                report.version, report.encoding
            );
            println!(
                "✓ Tracks: {} record{} decoded",
                report.tracks,
                plural(report.tracks)
            );
            println!(
                "✓ Watch directories: {} entr{} decoded",
                report.watch_dirs,
                if report.watch_dirs == 1 { "y" } else { "ies" }
            );
            if report.trailing == 0 {
                println!("✓ Trailing data: none");
            } else {
                println!(
                    "! Trailing data: {} byte{} after the watch-directory sentinel",
                    report.trailing,
                    plural(usize::try_from(report.trailing).unwrap_or(usize::MAX))
                );
            }
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

struct Report {
    version: u8,
    encoding: &'static str,
    tracks: usize,
    watch_dirs: usize,
    trailing: u64,
}

fn check(reader: BufReader<File>) -> Result<Report, DecodeError> {
    let mut decoder = LibraryDecoder::new(reader)?;
    let tracks = decoder.skip_tracks()?;
    let mut watch_dirs = 0;
    for entry in decoder.watch_dirs()? {
        entry?;
        watch_dirs += 1;
    }

    let header = decoder.header().clone();
    let mut rest = decoder.into_inner();
    let trailing = io::copy(&mut rest, &mut io::sink()).map_err(xmplib_wire::WireError::Io)?;

    Ok(Report {
        version: header.version,
        encoding: header.encoding.name(),
        tracks,
        watch_dirs,
        trailing,
    })
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a human-readable diagnostic string.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ DecodeError variant  │ Diagnostic message prefix                    │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ InvalidHeader        │ "not an XMPlay library — <inner error>"      │
/// │ Truncated            │ "file ends inside <field> — <inner error>"   │
/// │ SequencingViolation  │ "<error Display>"                            │
/// │ Wire                 │ "<error Display>"                            │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::InvalidHeader(inner) => format!("not an XMPlay library — {inner}"),
        DecodeError::Truncated { field, source } => {
            format!("file ends inside {field} — {source}")
        }
        other => other.to_string(),
    }
}
