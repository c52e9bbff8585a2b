use serde_json::{Map, Value};
use xmplib_decoder::{FieldValue, TrackRecord};
use xmplib_wire::text::unquote_csv;

use crate::config::TimeZone;
use crate::error::RenderError;
use crate::timefmt::format_timestamp;

/// JSON Lines renderer: one object per track.
///
/// Keys follow the layout order. Text is unquoted back to its plain form,
/// absent values become `null`.
///
/// ```text
/// {"file_name":"song.mp3","track_title":"",...,"subsong_count":null,"subsong_number":null}
/// ```
pub struct JsonLinesRenderer;

impl JsonLinesRenderer {
    /// Build the JSON value for one record.
    #[must_use]
    pub fn to_value(record: &TrackRecord, zone: TimeZone) -> Value {
        let object: Map<String, Value> = record
            .iter()
            .map(|(name, value)| (name.to_string(), Self::field_value(value, zone)))
            .collect();
        Value::Object(object)
    }

    /// One record as a compact single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialisation fails.
    pub fn render_object(record: &TrackRecord, zone: TimeZone) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&Self::to_value(record, zone))?)
    }

    fn field_value(value: &FieldValue, zone: TimeZone) -> Value {
        match value {
            FieldValue::Text(text) => Value::String(unquote_csv(text)),
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Timestamp(ts) => Value::String(format_timestamp(*ts, zone)),
            FieldValue::Absent => Value::Null,
        }
    }
}
