#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;
pub mod layout;
pub mod record;
pub mod watch_dir;

pub use decoder::{DecodedLibrary, LibraryDecoder, Section, Tracks, WatchDirs};
pub use error::DecodeError;
pub use layout::{FieldKind, FieldSpec, FieldValue, Presence, TRACK_LAYOUT};
pub use record::TrackRecord;
pub use watch_dir::WatchDirEntry;
