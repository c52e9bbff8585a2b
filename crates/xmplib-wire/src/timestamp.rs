use chrono::{DateTime, Utc};

/// 100 ns ticks per second in a `FILETIME`.
pub const FILETIME_TICKS_PER_SECOND: u64 = 10_000_000;

/// Seconds from 1601-01-01 (the `FILETIME` epoch) to 1970-01-01.
pub const FILETIME_UNIX_EPOCH_OFFSET: i64 = 11_644_473_600;

/// A point in time as seconds since 1970-01-01 UTC.
///
/// Both on-disk encodings land here: the 32-bit unix seconds used by
/// track records and the 64-bit `FILETIME` used by watch directories.
/// Only the latter can carry a sub-second part or predate 1970.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
}

impl Timestamp {
    #[must_use]
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    /// Convert a raw `FILETIME` tick count.
    ///
    /// `ticks / 10_000_000 - 11_644_473_600` gives the whole seconds; the
    /// remainder is kept as nanoseconds.
    #[must_use]
    pub fn from_filetime(ticks: u64) -> Self {
        // u64::MAX / 10^7 is about 1.8e12, well inside i64.
        #[allow(clippy::cast_possible_wrap)]
        let whole = (ticks / FILETIME_TICKS_PER_SECOND) as i64;
        #[allow(clippy::cast_possible_truncation)]
        let frac = (ticks % FILETIME_TICKS_PER_SECOND) as u32;
        Self {
            secs: whole - FILETIME_UNIX_EPOCH_OFFSET,
            nanos: frac * 100,
        }
    }

    #[must_use]
    pub fn unix_seconds(self) -> i64 {
        self.secs
    }

    #[must_use]
    pub fn subsec_nanos(self) -> u32 {
        self.nanos
    }

    /// `None` if the value is outside what `chrono` can represent.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.secs, self.nanos)
    }
}
