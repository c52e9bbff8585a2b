use xmplib_decoder::WatchDirEntry;
use xmplib_wire::LibraryHeader;

use crate::config::TimeZone;
use crate::timefmt::format_timestamp;

/// Plain-text library metadata report.
///
/// ```text
/// Library version: 1
/// Encoding: utf-8
/// Watch directory: "C:\Music" (with subfolders, last updated 2023-04-01 18:22:05)
/// Watch directory: "D:\Rips" (without subfolders, last updated 2022-11-30 09:01:44)
/// ```
///
/// Paths are printed in the quoted form the decoder hands out.
pub struct MetaReport;

impl MetaReport {
    /// The version and encoding lines.
    #[must_use]
    pub fn header_lines(header: &LibraryHeader) -> String {
        format!(
            "Library version: {}\nEncoding: {}",
            header.version, header.encoding
        )
    }

    /// One watch-directory line.
    #[must_use]
    pub fn watch_dir_line(entry: &WatchDirEntry, zone: TimeZone) -> String {
        let subfolders = if entry.includes_subfolders {
            "with"
        } else {
            "without"
        };
        format!(
            "Watch directory: {} ({subfolders} subfolders, last updated {})",
            entry.path,
            format_timestamp(entry.last_updated, zone)
        )
    }

    /// The full report, newline-terminated.
    #[must_use]
    pub fn render(header: &LibraryHeader, watch_dirs: &[WatchDirEntry], zone: TimeZone) -> String {
        let mut out = Self::header_lines(header);
        out.push('\n');
        for entry in watch_dirs {
            out.push_str(&Self::watch_dir_line(entry, zone));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use xmplib_wire::{InfoFlags, TextEncoding, Timestamp};

    use super::*;

    #[test]
    fn report_lines() {
        let header = LibraryHeader {
            version: 2,
            flags: InfoFlags::UTF8,
            encoding: TextEncoding::Utf8,
        };
        let dirs = [
            WatchDirEntry {
                path: "\"C:\\Music\"".into(),
                includes_subfolders: true,
                last_updated: Timestamp::from_filetime(0),
            },
            WatchDirEntry {
                path: "\"D:\\Rips\"".into(),
                includes_subfolders: false,
                last_updated: Timestamp::from_unix_seconds(1_600_000_000),
            },
        ];

        let report = MetaReport::render(&header, &dirs, TimeZone::Utc);
        assert_eq!(
            report,
            "Library version: 2\n\
             Encoding: utf-8\n\
             Watch directory: \"C:\\Music\" (with subfolders, last updated 1601-01-01 00:00:00)\n\
             Watch directory: \"D:\\Rips\" (without subfolders, last updated 2020-09-13 12:26:40)\n"
        );
    }
}
