use std::io::Read;

use crate::cursor::ByteCursor;
use crate::error::WireError;
use crate::text::TextEncoding;

/// Total header size in bytes (fixed).
pub const HEADER_SIZE: usize = 4;

/// Header info-flags byte.
///
/// Bit layout:
///   bits 0-6 = unused
///   bit 7    = UTF-8 (string fields are UTF-8 rather than ASCII)
///
/// Unknown bits are kept as read so they can be reported, but they do not
/// affect decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoFlags(u8);

impl InfoFlags {
    /// String fields are UTF-8.
    pub const UTF8: Self = Self(0b1000_0000);

    /// No flags set.
    pub const NONE: Self = Self(0);

    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn is_utf8(self) -> bool {
        self.0 & Self::UTF8.0 != 0
    }

    /// Encoding selected by these flags.
    pub fn encoding(self) -> TextEncoding {
        if self.is_utf8() {
            TextEncoding::Utf8
        } else {
            TextEncoding::Ascii
        }
    }
}

/// XMPlay library header — the first 4 bytes of every library file.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ Version (non-zero)               │
/// │ 0x01   │ 1 byte  │ Reserved (0x00)                  │
/// │ 0x02   │ 1 byte  │ Reserved (0x00)                  │
/// │ 0x03   │ 1 byte  │ Info flags (bit 7 = UTF-8)       │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// There is no magic number; a zero version or a set reserved byte is the
/// only sign that the input is not a library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibraryHeader {
    pub version: u8,
    pub flags: InfoFlags,
    pub encoding: TextEncoding,
}

impl LibraryHeader {
    /// Parse a header from the first 4 bytes of `buf`.
    ///
    /// # Errors
    ///
    /// - [`WireError::Truncated`] if `buf` is shorter than [`HEADER_SIZE`].
    /// - [`WireError::ZeroVersion`] if the version byte is 0.
    /// - [`WireError::ReservedNonZero`] if either reserved byte is set.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::Truncated {
                offset: 0,
                needed: HEADER_SIZE,
                got: buf.len(),
            });
        }

        let version = buf[0];
        if version == 0 {
            return Err(WireError::ZeroVersion);
        }

        for offset in 1..=2 {
            if buf[offset] != 0x00 {
                return Err(WireError::ReservedNonZero {
                    offset: offset as u64,
                    value: buf[offset],
                });
            }
        }

        let flags = InfoFlags::from_raw(buf[3]);
        Ok(Self {
            version,
            flags,
            encoding: flags.encoding(),
        })
    }

    /// Read and validate the header from the start of a cursor.
    ///
    /// All four bytes are consumed before any check runs.
    ///
    /// # Errors
    ///
    /// Same as [`read_from`](Self::read_from).
    pub fn read<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Self, WireError> {
        let buf: [u8; HEADER_SIZE] = cursor.read_array()?;
        Self::read_from(&buf)
    }
}
