#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod header;
pub mod text;
pub mod timestamp;

pub use cursor::ByteCursor;
pub use error::WireError;
pub use header::{InfoFlags, LibraryHeader};
pub use text::TextEncoding;
pub use timestamp::Timestamp;
