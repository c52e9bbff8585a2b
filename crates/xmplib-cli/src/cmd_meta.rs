/// Implementation of `xmplib meta`.
///
/// Prints the library version and encoding, then one line per watched
/// directory:
///
/// ```text
/// Library version: 1
/// Encoding: ascii
/// Watch directory: "C:\Music" (with subfolders, last updated 2023-04-01 18:22:05)
/// ```
use anyhow::{Context, Result};
use tracing::debug;
use xmplib_render::{MetaReport, TimeZone};

use crate::{MetaArgs, open_library};

/// Run the `xmplib meta` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any part of the library
/// fails to decode.
pub fn run(args: &MetaArgs) -> Result<()> {
    let zone = if args.utc { TimeZone::Utc } else { TimeZone::Local };
    let mut decoder = open_library(&args.file)?;

    println!("{}", MetaReport::header_lines(decoder.header()));

    let skipped = decoder
        .skip_tracks()
        .with_context(|| format!("failed to read track listing of {}", args.file.display()))?;
    debug!(tracks = skipped, "skipped track listing");

    for entry in decoder.watch_dirs()? {
        let entry = entry.with_context(|| {
            format!("failed to read watch directories of {}", args.file.display())
        })?;
        println!("{}", MetaReport::watch_dir_line(&entry, zone));
    }

    Ok(())
}
