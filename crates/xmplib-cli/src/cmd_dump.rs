/// Implementation of `xmplib dump`.
///
/// Streams the track listing from the decoder through a
/// [`DefaultRenderer`] one record at a time, so memory use does not grow
/// with the size of the library. Output stops at the track-listing
/// sentinel; the watch directories are left unread.
///
/// # Output formats
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────────────────┐
/// │ Format │ Shape                                                        │
/// ├────────┼──────────────────────────────────────────────────────────────┤
/// │ csv    │ header row, then "song.mp3",,"Title",...,4,,  (default)      │
/// │ jsonl  │ {"file_name":"song.mp3",...,"subsong_number":null}           │
/// └────────┴──────────────────────────────────────────────────────────────┘
/// ```
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use tracing::info;
use xmplib_render::{DefaultRenderer, OutputMode, RenderConfig, TimeZone, TrackRenderer};

use crate::{DumpArgs, open_library};

/// Run the `xmplib dump` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the library is malformed,
/// the `--format` value is unknown, or the output cannot be written.
pub fn run(args: &DumpArgs) -> Result<()> {
    let config = RenderConfig {
        mode: parse_output_mode(&args.format)?,
        time_zone: if args.utc { TimeZone::Utc } else { TimeZone::Local },
        header_row: !args.no_header,
    };

    let mut decoder = open_library(&args.file)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let renderer = DefaultRenderer;
    if let Some(line) = renderer.preamble(&config) {
        writeln!(out, "{line}").context("cannot write output")?;
    }

    let mut count = 0usize;
    for record in decoder.tracks()? {
        let record = record.with_context(|| {
            format!("failed to decode track {count} of {}", args.file.display())
        })?;
        renderer.write_track(&mut out, &record, &config)?;
        count += 1;
    }
    out.flush().context("cannot write output")?;

    info!(tracks = count, "dump complete");
    Ok(())
}

/// Parses the `--format` string to an [`OutputMode`].
///
/// # Errors
///
/// Returns an error for unrecognised format names.
fn parse_output_mode(s: &str) -> Result<OutputMode> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(OutputMode::Csv),
        "jsonl" | "json" | "ndjson" => Ok(OutputMode::JsonLines),
        _ => Err(anyhow!("unknown format {s:?}, expected csv|jsonl")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(parse_output_mode("csv").unwrap(), OutputMode::Csv);
        assert_eq!(parse_output_mode("JSONL").unwrap(), OutputMode::JsonLines);
        assert!(parse_output_mode("xml").is_err());
    }
}
