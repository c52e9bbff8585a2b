use std::io::{ErrorKind, Read};

use crate::error::WireError;
use crate::text::{self, TextEncoding};
use crate::timestamp::Timestamp;

/// String terminator in the library format.
const NUL: u8 = 0x00;

/// Forward-only reader over a library byte stream.
///
/// The cursor is the single piece of mutable state in a decode. It only
/// moves forward: every read consumes exactly the bytes it documents and
/// nothing is ever pushed back. The absolute offset is tracked so errors
/// can say where in the file a read failed.
///
/// ```text
///   ┌────────┬──────────────┬────────┬───────────┬─────────────┐
///   │ header │ track record │  ...   │ "" (end)  │ watch dirs  │
///   └────────┴──────────────┴────────┴───────────┴─────────────┘
///   0 ──────────────────────────────▶ position()
/// ```
///
/// Multi-byte integers are little-endian throughout. Text fields are
/// null-terminated with no length prefix.
///
/// The cursor issues single-byte reads while scanning strings, so wrap
/// unbuffered sources (files, sockets) in a `BufReader`.
pub struct ByteCursor<R> {
    reader: R,
    pos: u64,
}

impl<R: Read> ByteCursor<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Give back the underlying reader, positioned after the last byte read.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read exactly `N` bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::Truncated`] if the source ends first. The error
    ///   reports the offset where the field started and how many bytes
    ///   were available.
    /// - [`WireError::Io`] for any other read failure.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let start = self.pos;
        let mut buf = [0u8; N];
        let mut filled = 0;

        while filled < N {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(WireError::Truncated {
                        offset: start,
                        needed: N,
                        got: filled,
                    });
                }
                Ok(n) => {
                    filled += n;
                    self.pos += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }

        Ok(buf)
    }

    /// Read bytes up to (not including) `sentinel`, or to end of input.
    ///
    /// The sentinel itself is consumed. Running out of input is not an
    /// error here: whatever was collected is returned.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the source fails.
    pub fn read_until(&mut self, sentinel: u8) -> Result<Vec<u8>, WireError> {
        let mut out = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    self.pos += 1;
                    if byte[0] == sentinel {
                        break;
                    }
                    out.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(WireError::Io(e)),
            }
        }

        Ok(out)
    }

    /// One raw byte.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if the source is exhausted.
    pub fn read_byte(&mut self) -> Result<u8, WireError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// A little-endian `WORD`.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 2 bytes remain.
    pub fn read_word(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// A little-endian `DWORD`.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 4 bytes remain.
    pub fn read_dword(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// A Windows `FILETIME`: 8 bytes, 100 ns ticks since 1601-01-01.
    ///
    /// Zero is not special; it decodes to 1601-01-01 like any other value.
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 8 bytes remain.
    pub fn read_filetime(&mut self) -> Result<Timestamp, WireError> {
        let ticks = u64::from_le_bytes(self.read_array()?);
        Ok(Timestamp::from_filetime(ticks))
    }

    /// A `DWORD` of seconds since 1970-01-01, where 0 means "never".
    ///
    /// # Errors
    ///
    /// [`WireError::Truncated`] if fewer than 4 bytes remain.
    pub fn read_unix_timestamp(&mut self) -> Result<Option<Timestamp>, WireError> {
        let secs = self.read_dword()?;
        Ok((secs > 0).then(|| Timestamp::from_unix_seconds(i64::from(secs))))
    }

    /// A null-terminated string decoded with `encoding`, unquoted.
    ///
    /// End of input terminates the string like a `0x00` would, so an
    /// exhausted source yields `""`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the source fails.
    pub fn read_text(&mut self, encoding: TextEncoding) -> Result<String, WireError> {
        let raw = self.read_until(NUL)?;
        Ok(encoding.decode_lossy(&raw))
    }

    /// A null-terminated string in its CSV-ready form.
    ///
    /// Same bytes as [`read_text`](Self::read_text), passed through
    /// [`text::quote_csv`]: `A"B` comes back as `"A""B"`, and an empty
    /// string stays empty with no quotes around it. Track-listing and
    /// watch-directory sentinels are therefore still detected with
    /// `is_empty()`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Io`] if the source fails.
    pub fn read_string(&mut self, encoding: TextEncoding) -> Result<String, WireError> {
        let plain = self.read_text(encoding)?;
        Ok(text::quote_csv(&plain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(bytes: &[u8]) -> ByteCursor<&[u8]> {
        ByteCursor::new(bytes)
    }

    #[test]
    fn byte_word_dword_are_little_endian() {
        let mut c = cursor(&[0x7F, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(c.read_byte().unwrap(), 0x7F);
        assert_eq!(c.read_word().unwrap(), 0x1234);
        assert_eq!(c.read_dword().unwrap(), 0x1234_5678);
        assert_eq!(c.position(), 7);
    }

    #[test]
    fn word_and_dword_cover_their_full_range() {
        for value in [0u16, 1, 0x00FF, 0xFF00, u16::MAX] {
            let bytes = value.to_le_bytes();
            assert_eq!(cursor(&bytes).read_word().unwrap(), value);
        }
        for value in [0u32, 1, 0x0000_FFFF, 0xDEAD_BEEF, u32::MAX] {
            let bytes = value.to_le_bytes();
            assert_eq!(cursor(&bytes).read_dword().unwrap(), value);
        }
    }

    #[test]
    fn short_dword_is_truncated() {
        let mut c = cursor(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        c.read_byte().unwrap();
        c.read_word().unwrap();
        let err = c.read_dword().unwrap_err();
        assert!(matches!(
            err,
            WireError::Truncated {
                offset: 3,
                needed: 4,
                got: 2
            }
        ));
    }

    #[test]
    fn empty_source_byte_is_truncated() {
        let err = cursor(&[]).read_byte().unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn filetime_zero_is_1601() {
        let ts = cursor(&[0; 8]).read_filetime().unwrap();
        assert_eq!(ts.unix_seconds(), -11_644_473_600);
        assert_eq!(ts.subsec_nanos(), 0);
    }

    #[test]
    fn filetime_at_unix_epoch() {
        let ticks: u64 = 116_444_736_000_000_000;
        let ts = cursor(&ticks.to_le_bytes()).read_filetime().unwrap();
        assert_eq!(ts.unix_seconds(), 0);
    }

    #[test]
    fn unix_timestamp_zero_is_absent() {
        assert_eq!(cursor(&[0, 0, 0, 0]).read_unix_timestamp().unwrap(), None);
    }

    #[test]
    fn unix_timestamp_positive_is_present() {
        let secs: u32 = 1_600_000_000;
        let ts = cursor(&secs.to_le_bytes()).read_unix_timestamp().unwrap();
        assert_eq!(ts.map(Timestamp::unix_seconds), Some(1_600_000_000));
    }

    #[test]
    fn unix_timestamp_is_unsigned() {
        let ts = cursor(&[0xFF, 0xFF, 0xFF, 0xFF])
            .read_unix_timestamp()
            .unwrap()
            .unwrap();
        assert_eq!(ts.unix_seconds(), i64::from(u32::MAX));
    }

    #[test]
    fn string_with_quote_is_escaped_and_wrapped() {
        let mut c = cursor(&[0x41, 0x22, 0x42, 0x00, 0x99]);
        assert_eq!(c.read_string(TextEncoding::Ascii).unwrap(), "\"A\"\"B\"");
        // Terminator consumed, following byte untouched.
        assert_eq!(c.position(), 4);
        assert_eq!(c.read_byte().unwrap(), 0x99);
    }

    #[test]
    fn text_is_not_quoted() {
        let mut c = cursor(&[0x41, 0x22, 0x42, 0x00]);
        assert_eq!(c.read_text(TextEncoding::Ascii).unwrap(), "A\"B");
    }

    #[test]
    fn immediate_terminator_is_empty_without_quotes() {
        let mut c = cursor(&[0x00, 0x41]);
        assert_eq!(c.read_string(TextEncoding::Utf8).unwrap(), "");
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn string_at_end_of_input_is_empty() {
        assert_eq!(cursor(&[]).read_string(TextEncoding::Utf8).unwrap(), "");
    }

    #[test]
    fn unterminated_string_stops_at_end_of_input() {
        let mut c = cursor(b"abc");
        assert_eq!(c.read_string(TextEncoding::Ascii).unwrap(), "\"abc\"");
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn utf8_string_decodes_multibyte() {
        let mut c = cursor("Björk\0".as_bytes());
        assert_eq!(c.read_string(TextEncoding::Utf8).unwrap(), "\"Björk\"");
    }

    #[test]
    fn into_inner_returns_remaining_bytes() {
        let mut c = cursor(&[1, 2, 3]);
        c.read_byte().unwrap();
        let rest = c.into_inner();
        assert_eq!(rest, &[2, 3]);
    }
}
