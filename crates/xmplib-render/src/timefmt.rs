use chrono::{DateTime, Local, Utc};
use xmplib_wire::Timestamp;

use crate::config::TimeZone;

const WHOLE_SECONDS: &str = "%Y-%m-%d %H:%M:%S";
const WITH_MICROS: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// `YYYY-MM-DD HH:MM:SS`, with `.ffffff` appended only when the value has
/// a non-zero microsecond part.
///
/// Values chrono cannot represent fall back to the raw unix seconds.
pub(crate) fn format_timestamp(ts: Timestamp, zone: TimeZone) -> String {
    let Some(utc): Option<DateTime<Utc>> = ts.to_datetime() else {
        return ts.unix_seconds().to_string();
    };

    let pattern = if ts.subsec_nanos() / 1_000 == 0 {
        WHOLE_SECONDS
    } else {
        WITH_MICROS
    };

    match zone {
        TimeZone::Utc => utc.format(pattern).to_string(),
        TimeZone::Local => utc.with_timezone(&Local).format(pattern).to_string(),
    }
}
