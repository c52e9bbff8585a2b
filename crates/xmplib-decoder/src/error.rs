use xmplib_wire::WireError;

use crate::decoder::Section;

/// Errors that can occur while decoding a library.
///
/// Every variant is fatal for the decode in progress. The record layout is
/// positional, so once one field is misread nothing after it can be
/// trusted; there is no skip-and-continue.
///
/// ```text
///   DecodeError
///   ├── InvalidHeader(WireError)  ← zero version or reserved byte set
///   ├── Truncated                 ← input ended inside a field
///   ├── SequencingViolation       ← sections drained out of order
///   └── Wire(WireError)           ← I/O failure from the source
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The 4-byte header failed validation.
    ///
    /// Wraps [`WireError::ZeroVersion`] or [`WireError::ReservedNonZero`].
    #[error("invalid header: {0}")]
    InvalidHeader(WireError),

    /// The input ended before `field` could be read in full.
    #[error("truncated while reading {field}: {source}")]
    Truncated {
        field: &'static str,
        #[source]
        source: WireError,
    },

    /// The caller asked for a section the cursor is not positioned at.
    ///
    /// The watch-directory listing starts where the track listing's
    /// sentinel ends, so it can only be read once the track listing has
    /// been drained. This is a usage error, not a property of the file.
    #[error("sequencing violation: expected {expected} section, cursor is at {actual}")]
    SequencingViolation { expected: Section, actual: Section },

    /// A non-EOF failure from the underlying reader.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl DecodeError {
    /// Attach the field being read to a primitive read failure.
    pub(crate) fn in_field(field: &'static str, err: WireError) -> Self {
        if err.is_truncated() {
            Self::Truncated { field, source: err }
        } else {
            Self::Wire(err)
        }
    }

    /// Map a header read failure.
    ///
    /// A short header is truncation like any other; validation failures
    /// become [`DecodeError::InvalidHeader`].
    pub(crate) fn from_header(err: WireError) -> Self {
        match err {
            WireError::ZeroVersion | WireError::ReservedNonZero { .. } => {
                Self::InvalidHeader(err)
            }
            other => Self::in_field("header", other),
        }
    }
}
