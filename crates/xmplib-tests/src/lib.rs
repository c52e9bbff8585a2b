//! Synthetic library fixtures for the integration tests and benchmarks.
//!
//! [`LibraryBuilder`] lays bytes out exactly as the decoder expects to find
//! them. It exists only to produce test inputs; it is not a general-purpose
//! writer and makes no attempt to validate what it is given.

use xmplib_wire::timestamp::{FILETIME_TICKS_PER_SECOND, FILETIME_UNIX_EPOCH_OFFSET};

/// One track as it will be written.
///
/// Strings are written as their UTF-8 bytes followed by `0x00`. When
/// `subsongs` is non-zero the two subsong words are written too.
#[derive(Clone, Debug, Default)]
pub struct TrackFixture {
    pub file_name: String,
    pub track_title: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub track: String,
    pub genre: String,
    pub comment: String,
    pub file_type: String,
    pub subsongs: u8,
    pub duration: u32,
    pub last_play: u32,
    pub file_size: u32,
    pub play_count: u32,
    pub date_added: u32,
    pub flags: u8,
    pub rating: u8,
    pub subsong_count: u16,
    pub subsong_number: u16,
}

impl TrackFixture {
    /// A track with only a file name; every other field empty or zero.
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            ..Self::default()
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        for text in [
            &self.file_name,
            &self.track_title,
            &self.title,
            &self.artist,
            &self.album,
            &self.year,
            &self.track,
            &self.genre,
            &self.comment,
            &self.file_type,
        ] {
            write_cstr(out, text.as_bytes());
        }
        out.push(self.subsongs);
        for dword in [
            self.duration,
            self.last_play,
            self.file_size,
            self.play_count,
            self.date_added,
        ] {
            out.extend_from_slice(&dword.to_le_bytes());
        }
        out.push(self.flags);
        out.push(self.rating);
        if self.subsongs > 0 {
            out.extend_from_slice(&self.subsong_count.to_le_bytes());
            out.extend_from_slice(&self.subsong_number.to_le_bytes());
        }
    }
}

/// One watch-directory entry as it will be written.
#[derive(Clone, Debug)]
pub struct WatchDirFixture {
    pub path: String,
    pub mode: u8,
    pub filetime: u64,
}

/// Builds a complete library byte stream.
///
/// ```text
/// header(4) │ track* │ 0x00 │ watch_dir* │ 0x00 │ trailing
/// ```
#[derive(Clone, Debug)]
pub struct LibraryBuilder {
    header: [u8; 4],
    tracks: Vec<TrackFixture>,
    watch_dirs: Vec<WatchDirFixture>,
    trailing: Vec<u8>,
}

impl Default for LibraryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryBuilder {
    /// Version 1, ASCII, empty listings.
    pub fn new() -> Self {
        Self {
            header: [1, 0, 0, 0],
            tracks: Vec::new(),
            watch_dirs: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Overwrite all four header bytes, valid or not.
    pub fn raw_header(&mut self, header: [u8; 4]) -> &mut Self {
        self.header = header;
        self
    }

    /// Set bit 7 of the info flags.
    pub fn utf8(&mut self) -> &mut Self {
        self.header[3] |= 0x80;
        self
    }

    pub fn add_track(&mut self, track: TrackFixture) -> &mut Self {
        self.tracks.push(track);
        self
    }

    pub fn add_watch_dir(&mut self, path: &str, mode: u8, filetime: u64) -> &mut Self {
        self.watch_dirs.push(WatchDirFixture {
            path: path.to_string(),
            mode,
            filetime,
        });
        self
    }

    /// Bytes appended after the watch-directory sentinel.
    pub fn trailing(&mut self, bytes: &[u8]) -> &mut Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header.to_vec();
        for track in &self.tracks {
            track.write(&mut out);
        }
        out.push(0);
        for dir in &self.watch_dirs {
            write_cstr(&mut out, dir.path.as_bytes());
            out.push(dir.mode);
            out.extend_from_slice(&dir.filetime.to_le_bytes());
        }
        out.push(0);
        out.extend_from_slice(&self.trailing);
        out
    }
}

/// `FILETIME` ticks for a unix time in whole seconds.
pub fn filetime_from_unix(secs: i64) -> u64 {
    let since_1601 = u64::try_from(secs + FILETIME_UNIX_EPOCH_OFFSET)
        .unwrap_or_else(|_| panic!("{secs} predates 1601"));
    since_1601 * FILETIME_TICKS_PER_SECOND
}

/// A small library with one plain track, one track with subsongs, and two
/// watched directories. Shared by the conformance tests and benchmarks.
pub fn sample_library() -> LibraryBuilder {
    let mut builder = LibraryBuilder::new();
    builder
        .add_track(TrackFixture {
            file_name: "C:\\Music\\song.mp3".into(),
            title: "Song".into(),
            artist: "Artist, The".into(),
            album: "Album \"Live\"".into(),
            year: "1999".into(),
            track: "3".into(),
            genre: "Rock".into(),
            file_type: "MP3".into(),
            duration: 215,
            last_play: 1_600_000_000,
            file_size: 4_194_304,
            play_count: 12,
            flags: 1,
            rating: 4,
            ..TrackFixture::default()
        })
        .add_track(TrackFixture {
            file_name: "C:\\Music\\tune.xm".into(),
            file_type: "XM".into(),
            subsongs: 3,
            duration: 90,
            file_size: 65_536,
            date_added: 1_500_000_000,
            subsong_count: 3,
            subsong_number: 2,
            ..TrackFixture::default()
        })
        .add_watch_dir("C:\\Music", 2, 0)
        .add_watch_dir("D:\\Rips", 1, filetime_from_unix(1_600_000_000));
    builder
}

/// A library of `n` generated tracks, for benchmarks.
pub fn large_library(n: usize) -> Vec<u8> {
    let mut builder = LibraryBuilder::new();
    builder.utf8();
    for i in 0..n {
        let with_subsongs = i % 7 == 0;
        builder.add_track(TrackFixture {
            file_name: format!("D:\\Library\\Artist {}\\Track {i:05}.flac", i % 50),
            title: format!("Track {i}"),
            artist: format!("Artist {}", i % 50),
            album: format!("Album {}", i % 200),
            file_type: "FLAC".into(),
            subsongs: u8::from(with_subsongs),
            duration: 180_000,
            file_size: 30_000_000,
            play_count: u32::try_from(i % 100).unwrap_or(0),
            subsong_count: if with_subsongs { 4 } else { 0 },
            subsong_number: if with_subsongs { 1 } else { 0 },
            ..TrackFixture::default()
        });
    }
    builder.add_watch_dir("D:\\Library", 2, filetime_from_unix(1_700_000_000));
    builder.build()
}

fn write_cstr(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    out.push(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_is_header_and_two_sentinels() {
        assert_eq!(LibraryBuilder::new().build(), [1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn filetime_helper_matches_epoch_offset() {
        assert_eq!(filetime_from_unix(0), 116_444_736_000_000_000);
    }
}
