use xmplib_decoder::layout::field_names;
use xmplib_decoder::{FieldValue, TrackRecord};

use crate::config::TimeZone;
use crate::timefmt::format_timestamp;

/// CSV renderer: one comma-separated line per track.
///
/// Text cells arrive from the decoder already quoted and escaped, so they
/// are written verbatim. Everything else is unquoted.
///
/// ```text
/// file_name,track_title,title,...,rating,subsong_count,subsong_number
/// "song.mp3",,"Title",...,4,,
/// "tune.xm",,,...,0,12,3
/// ```
pub struct CsvRenderer;

impl CsvRenderer {
    /// Column names in layout order.
    #[must_use]
    pub fn header_row() -> String {
        field_names().collect::<Vec<_>>().join(",")
    }

    /// One record as a CSV line, without the newline.
    #[must_use]
    pub fn render_row(record: &TrackRecord, zone: TimeZone) -> String {
        record
            .values()
            .map(|value| Self::render_cell(value, zone))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// A single cell.
    ///
    /// | Value        | Cell                         |
    /// |--------------|------------------------------|
    /// | `Text`       | as decoded (already quoted)  |
    /// | `Integer`    | decimal                      |
    /// | `Timestamp`  | `YYYY-MM-DD HH:MM:SS`        |
    /// | `Absent`     | empty                        |
    #[must_use]
    pub fn render_cell(value: &FieldValue, zone: TimeZone) -> String {
        match value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Timestamp(ts) => format_timestamp(*ts, zone),
            FieldValue::Absent => String::new(),
        }
    }
}
