use std::fmt;
use std::io::Read;
use std::iter::FusedIterator;

use tracing::{debug, trace};
use xmplib_wire::{ByteCursor, LibraryHeader};

use crate::error::DecodeError;
use crate::record::{decode_record, TrackRecord};
use crate::watch_dir::{decode_watch_dir, WatchDirEntry};

/// Where the decoder's cursor currently sits.
///
/// ```text
///   new() ──▶ Tracks ──(empty file_name)──▶ WatchDirs ──(empty path)──▶ Done
///                │                              │
///                └──────────(any error)─────────┴──────────────────▶ Failed
/// ```
///
/// The header is read inside [`LibraryDecoder::new`], so a constructed
/// decoder always starts at `Tracks`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Tracks,
    WatchDirs,
    Done,
    Failed,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tracks => "track listing",
            Self::WatchDirs => "watch-directory listing",
            Self::Done => "end of library",
            Self::Failed => "failed decode",
        })
    }
}

/// The result of decoding a whole library eagerly.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ DecodedLibrary                                           │
/// │   header:     LibraryHeader      ← version, encoding     │
/// │   tracks:     Vec<TrackRecord>   ← file order            │
/// │   watch_dirs: Vec<WatchDirEntry> ← file order            │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Neither sentinel is included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLibrary {
    pub header: LibraryHeader,
    pub tracks: Vec<TrackRecord>,
    pub watch_dirs: Vec<WatchDirEntry>,
}

/// Streaming decoder for an XMPlay library.
///
/// Reads the header up front, then hands out the two listings as lazy
/// iterators over the same forward-only cursor. They must be consumed in
/// file order:
///
///   1. [`tracks`](Self::tracks) until it returns `None` (the empty
///      `file_name` sentinel).
///   2. [`watch_dirs`](Self::watch_dirs) until it returns `None` (the empty
///      path sentinel).
///
/// Both iterators borrow the decoder mutably, so only one can be live at a
/// time. Dropping the track iterator part-way and calling `tracks()` again
/// continues with the next record. Asking for the watch directories before
/// the track sentinel has been reached is a
/// [`DecodeError::SequencingViolation`].
///
/// # Example
///
/// ```rust
/// use xmplib_decoder::LibraryDecoder;
///
/// // Header (v1, ASCII), no tracks, no watch directories.
/// let bytes = [1u8, 0, 0, 0, 0, 0];
/// let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();
/// assert_eq!(decoder.tracks().unwrap().count(), 0);
/// assert_eq!(decoder.watch_dirs().unwrap().count(), 0);
/// ```
pub struct LibraryDecoder<R> {
    cursor: ByteCursor<R>,
    header: LibraryHeader,
    section: Section,
    tracks_read: usize,
    watch_dirs_read: usize,
}

impl<R: Read> LibraryDecoder<R> {
    /// Wrap `reader` and read the 4-byte header.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidHeader`] for a zero version or a set
    ///   reserved byte.
    /// - [`DecodeError::Truncated`] if the input is shorter than the header.
    pub fn new(reader: R) -> Result<Self, DecodeError> {
        let mut cursor = ByteCursor::new(reader);
        let header = LibraryHeader::read(&mut cursor).map_err(DecodeError::from_header)?;

        debug!(
            version = header.version,
            encoding = %header.encoding,
            flags = header.flags.raw(),
            "library header"
        );

        Ok(Self {
            cursor,
            header,
            section: Section::Tracks,
            tracks_read: 0,
            watch_dirs_read: 0,
        })
    }

    /// Decode everything from `reader` into memory.
    ///
    /// # Errors
    ///
    /// Any error from [`new`](Self::new) or from either listing.
    pub fn decode_reader(reader: R) -> Result<DecodedLibrary, DecodeError> {
        Self::new(reader)?.collect_all()
    }

    #[must_use]
    pub fn header(&self) -> &LibraryHeader {
        &self.header
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Bytes consumed from the source so far, header included.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Records emitted so far.
    #[must_use]
    pub fn tracks_read(&self) -> usize {
        self.tracks_read
    }

    /// Watch-directory entries emitted so far.
    #[must_use]
    pub fn watch_dirs_read(&self) -> usize {
        self.watch_dirs_read
    }

    /// Give back the source. After `Done` it is positioned just past the
    /// watch-directory sentinel.
    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }

    /// The track listing, from the current record to the sentinel.
    ///
    /// # Errors
    ///
    /// [`DecodeError::SequencingViolation`] if the listing has already
    /// ended or the decode has failed.
    pub fn tracks(&mut self) -> Result<Tracks<'_, R>, DecodeError> {
        self.expect_section(Section::Tracks)?;
        Ok(Tracks { decoder: self })
    }

    /// Read past the rest of the track listing, discarding records.
    ///
    /// Returns how many records were skipped.
    ///
    /// # Errors
    ///
    /// Same as [`tracks`](Self::tracks), plus any record decode error.
    pub fn skip_tracks(&mut self) -> Result<usize, DecodeError> {
        let mut skipped = 0;
        for record in self.tracks()? {
            record?;
            skipped += 1;
        }
        Ok(skipped)
    }

    /// The watch-directory listing.
    ///
    /// # Errors
    ///
    /// [`DecodeError::SequencingViolation`] unless the track listing has
    /// reached its sentinel and the watch-directory listing has not.
    pub fn watch_dirs(&mut self) -> Result<WatchDirs<'_, R>, DecodeError> {
        self.expect_section(Section::WatchDirs)?;
        Ok(WatchDirs { decoder: self })
    }

    /// Drain both listings in order.
    ///
    /// # Errors
    ///
    /// The first error from either listing.
    pub fn collect_all(mut self) -> Result<DecodedLibrary, DecodeError> {
        let tracks = self.tracks()?.collect::<Result<Vec<_>, _>>()?;
        let watch_dirs = self.watch_dirs()?.collect::<Result<Vec<_>, _>>()?;
        Ok(DecodedLibrary {
            header: self.header,
            tracks,
            watch_dirs,
        })
    }

    fn expect_section(&self, expected: Section) -> Result<(), DecodeError> {
        if self.section == expected {
            Ok(())
        } else {
            Err(DecodeError::SequencingViolation {
                expected,
                actual: self.section,
            })
        }
    }
}

impl<'a> LibraryDecoder<&'a [u8]> {
    /// Decode a complete in-memory library.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidHeader`] if the header is rejected.
    /// - [`DecodeError::Truncated`] if the bytes end inside any field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xmplib_decoder::LibraryDecoder;
    ///
    /// let err = LibraryDecoder::decode(&[0u8, 0, 0, 0][..]).unwrap_err();
    /// assert!(err.to_string().starts_with("invalid header"));
    /// ```
    pub fn decode(bytes: &'a [u8]) -> Result<DecodedLibrary, DecodeError> {
        Self::decode_reader(bytes)
    }
}

/// Lazy track listing. See [`LibraryDecoder::tracks`].
pub struct Tracks<'d, R> {
    decoder: &'d mut LibraryDecoder<R>,
}

impl<R: Read> Iterator for Tracks<'_, R> {
    type Item = Result<TrackRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let d = &mut *self.decoder;
        if d.section != Section::Tracks {
            return None;
        }

        match decode_record(&mut d.cursor, d.header.encoding) {
            Ok(Some(record)) => {
                d.tracks_read += 1;
                trace!(index = d.tracks_read - 1, file_name = record.file_name(), "track");
                Some(Ok(record))
            }
            Ok(None) => {
                debug!(
                    tracks = d.tracks_read,
                    offset = d.cursor.position(),
                    "track listing complete"
                );
                d.section = Section::WatchDirs;
                None
            }
            Err(e) => {
                d.section = Section::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Tracks<'_, R> {}

/// Lazy watch-directory listing. See [`LibraryDecoder::watch_dirs`].
pub struct WatchDirs<'d, R> {
    decoder: &'d mut LibraryDecoder<R>,
}

impl<R: Read> Iterator for WatchDirs<'_, R> {
    type Item = Result<WatchDirEntry, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let d = &mut *self.decoder;
        if d.section != Section::WatchDirs {
            return None;
        }

        match decode_watch_dir(&mut d.cursor, d.header.encoding) {
            Ok(Some(entry)) => {
                d.watch_dirs_read += 1;
                trace!(path = %entry.path, subfolders = entry.includes_subfolders, "watch dir");
                Some(Ok(entry))
            }
            Ok(None) => {
                debug!(
                    watch_dirs = d.watch_dirs_read,
                    offset = d.cursor.position(),
                    "watch-directory listing complete"
                );
                d.section = Section::Done;
                None
            }
            Err(e) => {
                d.section = Section::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for WatchDirs<'_, R> {}

#[cfg(test)]
mod tests {
    use xmplib_wire::TextEncoding;

    use super::*;
    use crate::layout::names;

    /// Header + one record per file name (no subsongs) + sentinel +
    /// one watch dir per path + sentinel.
    fn library(files: &[&str], dirs: &[(&str, u8)]) -> Vec<u8> {
        let mut out = vec![1, 0, 0, 0];
        for file in files {
            out.extend_from_slice(file.as_bytes());
            out.push(0);
            out.extend_from_slice(&[0; 9]); // nine empty strings
            out.push(0); // subsongs
            out.extend_from_slice(&[0; 20]); // five dwords
            out.extend_from_slice(&[0, 0]); // flags, rating
        }
        out.push(0);
        for (path, mode) in dirs {
            out.extend_from_slice(path.as_bytes());
            out.push(0);
            out.push(*mode);
            out.extend_from_slice(&[0; 8]);
        }
        out.push(0);
        out
    }

    #[test]
    fn decode_collects_both_listings() {
        let bytes = library(&["a.mp3", "b.flac"], &[("C:\\Music", 2), ("D:\\Rips", 0)]);
        let decoded = LibraryDecoder::decode(&bytes).unwrap();

        assert_eq!(decoded.header.version, 1);
        assert_eq!(decoded.header.encoding, TextEncoding::Ascii);
        let files: Vec<_> = decoded.tracks.iter().map(TrackRecord::file_name).collect();
        assert_eq!(files, ["\"a.mp3\"", "\"b.flac\""]);
        assert_eq!(decoded.watch_dirs.len(), 2);
        assert!(decoded.watch_dirs[0].includes_subfolders);
        assert!(!decoded.watch_dirs[1].includes_subfolders);
    }

    #[test]
    fn header_failure_is_reported_before_anything_else() {
        let mut bytes = library(&["a.mp3"], &[]);
        bytes[2] = 1;
        assert!(matches!(
            LibraryDecoder::new(&bytes[..]),
            Err(DecodeError::InvalidHeader(_))
        ));
    }

    #[test]
    fn short_header_is_truncated() {
        assert!(matches!(
            LibraryDecoder::new(&[1u8, 0][..]),
            Err(DecodeError::Truncated { field: "header", .. })
        ));
    }

    #[test]
    fn watch_dirs_before_tracks_drained_is_violation() {
        let bytes = library(&["a.mp3"], &[("C:\\Music", 2)]);
        let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();

        let err = decoder.watch_dirs().err().unwrap();
        assert!(matches!(
            err,
            DecodeError::SequencingViolation {
                expected: Section::WatchDirs,
                actual: Section::Tracks,
            }
        ));
    }

    #[test]
    fn partially_consumed_tracks_resume() {
        let bytes = library(&["a.mp3", "b.mp3", "c.mp3"], &[]);
        let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();

        let first = decoder.tracks().unwrap().next().unwrap().unwrap();
        assert_eq!(first.file_name(), "\"a.mp3\"");
        assert!(decoder.watch_dirs().is_err());

        let rest: Vec<_> = decoder.tracks().unwrap().map(Result::unwrap).collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(decoder.tracks_read(), 3);
        assert_eq!(decoder.section(), Section::WatchDirs);
    }

    #[test]
    fn listings_are_not_restartable() {
        let bytes = library(&["a.mp3"], &[("C:\\Music", 2)]);
        let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();
        assert_eq!(decoder.skip_tracks().unwrap(), 1);
        assert!(matches!(
            decoder.tracks(),
            Err(DecodeError::SequencingViolation {
                expected: Section::Tracks,
                actual: Section::WatchDirs,
            })
        ));
        assert_eq!(decoder.watch_dirs().unwrap().count(), 1);
        assert_eq!(decoder.section(), Section::Done);
        assert!(decoder.watch_dirs().is_err());
    }

    #[test]
    fn error_fuses_and_fails_decoder() {
        let mut bytes = library(&["a.mp3"], &[]);
        // Drop the sentinels and cut into the first record's dwords.
        bytes.truncate(4 + 6 + 9 + 1 + 3);
        let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();

        let mut tracks = decoder.tracks().unwrap();
        assert!(matches!(
            tracks.next(),
            Some(Err(DecodeError::Truncated {
                field: names::DURATION,
                ..
            }))
        ));
        assert!(tracks.next().is_none());
        assert_eq!(decoder.section(), Section::Failed);
        assert!(matches!(
            decoder.watch_dirs(),
            Err(DecodeError::SequencingViolation {
                actual: Section::Failed,
                ..
            })
        ));
    }

    #[test]
    fn into_inner_leaves_trailing_bytes() {
        let mut bytes = library(&[], &[]);
        bytes.extend_from_slice(b"tail");
        let mut decoder = LibraryDecoder::new(&bytes[..]).unwrap();
        decoder.skip_tracks().unwrap();
        decoder.watch_dirs().unwrap().for_each(drop);
        assert_eq!(decoder.position(), 6);
        assert_eq!(decoder.into_inner(), b"tail");
    }
}
