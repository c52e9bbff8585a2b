use std::io::Read;

use xmplib_wire::{ByteCursor, TextEncoding, Timestamp, WireError};

/// Field names, in the spelling used for CSV headers and JSON keys.
pub mod names {
    pub const FILE_NAME: &str = "file_name";
    pub const TRACK_TITLE: &str = "track_title";
    pub const TITLE: &str = "title";
    pub const ARTIST: &str = "artist";
    pub const ALBUM: &str = "album";
    pub const YEAR: &str = "year";
    pub const TRACK: &str = "track";
    pub const GENRE: &str = "genre";
    pub const COMMENT: &str = "comment";
    pub const FILE_TYPE: &str = "file_type";
    pub const SUBSONGS: &str = "subsongs";
    pub const DURATION: &str = "duration";
    pub const LAST_PLAY: &str = "last_play";
    pub const FILE_SIZE: &str = "file_size";
    pub const PLAY_COUNT: &str = "play_count";
    pub const DATE_ADDED: &str = "date_added";
    pub const FLAGS: &str = "flags";
    pub const RATING: &str = "rating";
    pub const SUBSONG_COUNT: &str = "subsong_count";
    pub const SUBSONG_NUMBER: &str = "subsong_number";
}

/// How a field is stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Null-terminated string in the header's encoding.
    String,
    /// One unsigned byte.
    Byte,
    /// Little-endian u16.
    Word,
    /// Little-endian u32.
    Dword,
    /// Little-endian u32 seconds since 1970; 0 means "never".
    UnixTimestamp,
}

impl FieldKind {
    /// Read one value of this kind from the cursor.
    ///
    /// # Errors
    ///
    /// Propagates the primitive reader's [`WireError`].
    pub fn decode<R: Read>(
        self,
        cursor: &mut ByteCursor<R>,
        encoding: TextEncoding,
    ) -> Result<FieldValue, WireError> {
        Ok(match self {
            Self::String => FieldValue::Text(cursor.read_string(encoding)?),
            Self::Byte => FieldValue::Integer(u32::from(cursor.read_byte()?)),
            Self::Word => FieldValue::Integer(u32::from(cursor.read_word()?)),
            Self::Dword => FieldValue::Integer(cursor.read_dword()?),
            Self::UnixTimestamp => cursor
                .read_unix_timestamp()?
                .map_or(FieldValue::Absent, FieldValue::Timestamp),
        })
    }
}

/// When a field is present in a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Always,
    /// Only stored when the record's `subsongs` byte was non-zero.
    WithSubsongs,
}

/// One entry of the track record layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

const fn always(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        presence: Presence::Always,
    }
}

const fn with_subsongs(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        presence: Presence::WithSubsongs,
    }
}

/// Track record layout, in file order.
///
/// Decoding walks this table front to back. Renderers read the names from
/// it for column headers but nothing else touches it, so output changes
/// cannot reorder the decode.
///
/// ```text
/// ┌─────┬────────────────┬───────────────┬───────────────────────────┐
/// │ #   │ Field          │ Kind          │ Presence                  │
/// ├─────┼────────────────┼───────────────┼───────────────────────────┤
/// │ 0-9 │ file_name ..   │ string        │ always                    │
/// │     │ file_type      │               │                           │
/// │ 10  │ subsongs       │ byte          │ always (stored as 0 / 1)  │
/// │ 11  │ duration       │ dword         │ always                    │
/// │ 12  │ last_play      │ unix time     │ always                    │
/// │ 13  │ file_size      │ dword         │ always                    │
/// │ 14  │ play_count     │ dword         │ always                    │
/// │ 15  │ date_added     │ unix time     │ always                    │
/// │ 16  │ flags          │ byte          │ always                    │
/// │ 17  │ rating         │ byte          │ always                    │
/// │ 18  │ subsong_count  │ word          │ only if subsongs > 0      │
/// │ 19  │ subsong_number │ word          │ only if subsongs > 0      │
/// └─────┴────────────────┴───────────────┴───────────────────────────┘
/// ```
pub static TRACK_LAYOUT: [FieldSpec; 20] = [
    always(names::FILE_NAME, FieldKind::String),
    always(names::TRACK_TITLE, FieldKind::String),
    always(names::TITLE, FieldKind::String),
    always(names::ARTIST, FieldKind::String),
    always(names::ALBUM, FieldKind::String),
    always(names::YEAR, FieldKind::String),
    always(names::TRACK, FieldKind::String),
    always(names::GENRE, FieldKind::String),
    always(names::COMMENT, FieldKind::String),
    always(names::FILE_TYPE, FieldKind::String),
    always(names::SUBSONGS, FieldKind::Byte),
    always(names::DURATION, FieldKind::Dword),
    always(names::LAST_PLAY, FieldKind::UnixTimestamp),
    always(names::FILE_SIZE, FieldKind::Dword),
    always(names::PLAY_COUNT, FieldKind::Dword),
    always(names::DATE_ADDED, FieldKind::UnixTimestamp),
    always(names::FLAGS, FieldKind::Byte),
    always(names::RATING, FieldKind::Byte),
    with_subsongs(names::SUBSONG_COUNT, FieldKind::Word),
    with_subsongs(names::SUBSONG_NUMBER, FieldKind::Word),
];

/// Field names in layout order.
pub fn field_names() -> impl Iterator<Item = &'static str> {
    TRACK_LAYOUT.iter().map(|spec| spec.name)
}

/// A decoded field value.
///
/// Text is held in its CSV-quoted form, exactly as
/// [`ByteCursor::read_string`] returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u32),
    Timestamp(Timestamp),
    /// A zero unix timestamp, or a subsong field skipped by the layout.
    Absent,
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
