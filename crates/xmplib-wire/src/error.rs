/// Errors raised while reading primitive fields and the library header.
///
/// Every multi-byte read either obtains all of its bytes or fails with
/// [`WireError::Truncated`]; there is no partial value. The header checks
/// report which invariant was broken so a caller can tell "not a library
/// file" apart from "library file cut short".
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The source ran out before a fixed-width field was complete.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, got {got}")]
    Truncated { offset: u64, needed: usize, got: usize },

    /// The version byte at offset 0 was zero.
    #[error("library version is 0")]
    ZeroVersion,

    /// One of the two reserved header bytes was set.
    #[error("reserved field at offset {offset} was {value:#04X}, expected 0x00")]
    ReservedNonZero { offset: u64, value: u8 },

    /// I/O error from the underlying source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WireError {
    /// True when the error means the input was cut short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}
