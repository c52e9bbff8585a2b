use std::io::Read;

use xmplib_wire::{ByteCursor, TextEncoding};

use crate::error::DecodeError;
use crate::layout::{names, FieldValue, Presence, TRACK_LAYOUT};

/// One track of the library: every layout field, in layout order.
///
/// A record always holds all twenty fields. Fields that were not on disk
/// (the subsong words of a track without subsongs) and "never" timestamps
/// are [`FieldValue::Absent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl TrackRecord {
    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Fields in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Values in layout order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The quoted file name. Never empty for an emitted record.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.get(names::FILE_NAME)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    /// Whether the track has subsongs (the stored 0/1 flag).
    #[must_use]
    pub fn has_subsongs(&self) -> bool {
        self.get(names::SUBSONGS).and_then(FieldValue::as_integer) == Some(1)
    }
}

/// Decode one track record.
///
/// Returns `Ok(None)` at the end-of-listing sentinel: a record whose
/// `file_name` is empty. Nothing past that file name is read.
///
/// `subsongs` is normalised to 0 or 1, and when it was 0 the two
/// [`Presence::WithSubsongs`] fields are recorded as absent without
/// touching the cursor.
///
/// # Errors
///
/// [`DecodeError::Truncated`] naming the field if the input ends inside
/// the record.
pub fn decode_record<R: Read>(
    cursor: &mut ByteCursor<R>,
    encoding: TextEncoding,
) -> Result<Option<TrackRecord>, DecodeError> {
    let mut fields = Vec::with_capacity(TRACK_LAYOUT.len());
    let mut has_subsongs = true;

    for spec in &TRACK_LAYOUT {
        if spec.presence == Presence::WithSubsongs && !has_subsongs {
            fields.push((spec.name, FieldValue::Absent));
            continue;
        }

        let mut value = spec
            .kind
            .decode(cursor, encoding)
            .map_err(|e| DecodeError::in_field(spec.name, e))?;

        match spec.name {
            names::FILE_NAME if value.as_text().is_some_and(str::is_empty) => {
                return Ok(None);
            }
            names::SUBSONGS => {
                has_subsongs = value.as_integer().is_some_and(|n| n > 0);
                value = FieldValue::Integer(u32::from(has_subsongs));
            }
            _ => {}
        }

        fields.push((spec.name, value));
    }

    Ok(Some(TrackRecord { fields }))
}

#[cfg(test)]
mod tests {
    use xmplib_wire::Timestamp;

    use super::*;

    /// Bytes for a record with the given file name and subsongs byte.
    ///
    /// Every string after the file name is "x"; integers are distinct so
    /// misalignment shows up as wrong values.
    fn record_bytes(file_name: &str, subsongs: u8, words: Option<(u16, u16)>) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(file_name.as_bytes());
        out.push(0);
        for _ in 0..9 {
            out.extend_from_slice(b"x\0");
        }
        out.push(subsongs);
        out.extend_from_slice(&180_000u32.to_le_bytes()); // duration
        out.extend_from_slice(&1_600_000_000u32.to_le_bytes()); // last_play
        out.extend_from_slice(&4_096u32.to_le_bytes()); // file_size
        out.extend_from_slice(&7u32.to_le_bytes()); // play_count
        out.extend_from_slice(&0u32.to_le_bytes()); // date_added
        out.push(0x02); // flags
        out.push(4); // rating
        if let Some((count, number)) = words {
            out.extend_from_slice(&count.to_le_bytes());
            out.extend_from_slice(&number.to_le_bytes());
        }
        out
    }

    fn decode(bytes: &[u8]) -> (Result<Option<TrackRecord>, DecodeError>, u64) {
        let mut cursor = ByteCursor::new(bytes);
        let result = decode_record(&mut cursor, TextEncoding::Ascii);
        (result, cursor.position())
    }

    #[test]
    fn record_without_subsongs_skips_words() {
        let mut bytes = record_bytes("song.mp3", 0, None);
        let len = bytes.len() as u64;
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let (result, pos) = decode(&bytes);
        let record = result.unwrap().unwrap();

        assert_eq!(pos, len, "no bytes consumed for subsong words");
        assert_eq!(record.len(), 20);
        assert_eq!(record.file_name(), "\"song.mp3\"");
        assert_eq!(record.get(names::SUBSONGS), Some(&FieldValue::Integer(0)));
        assert!(record.get(names::SUBSONG_COUNT).unwrap().is_absent());
        assert!(record.get(names::SUBSONG_NUMBER).unwrap().is_absent());
        assert!(!record.has_subsongs());
    }

    #[test]
    fn record_with_subsongs_reads_words_and_normalises() {
        let bytes = record_bytes("mod.xm", 5, Some((12, 3)));
        let (result, pos) = decode(&bytes);
        let record = result.unwrap().unwrap();

        assert_eq!(pos, bytes.len() as u64);
        assert_eq!(record.get(names::SUBSONGS), Some(&FieldValue::Integer(1)));
        assert_eq!(record.get(names::SUBSONG_COUNT), Some(&FieldValue::Integer(12)));
        assert_eq!(record.get(names::SUBSONG_NUMBER), Some(&FieldValue::Integer(3)));
        assert!(record.has_subsongs());
    }

    #[test]
    fn numeric_and_time_fields_decode_in_order() {
        let bytes = record_bytes("a.ogg", 0, None);
        let record = decode(&bytes).0.unwrap().unwrap();

        assert_eq!(record.get(names::DURATION), Some(&FieldValue::Integer(180_000)));
        assert_eq!(
            record.get(names::LAST_PLAY),
            Some(&FieldValue::Timestamp(Timestamp::from_unix_seconds(1_600_000_000)))
        );
        assert_eq!(record.get(names::FILE_SIZE), Some(&FieldValue::Integer(4_096)));
        assert_eq!(record.get(names::PLAY_COUNT), Some(&FieldValue::Integer(7)));
        assert_eq!(record.get(names::DATE_ADDED), Some(&FieldValue::Absent));
        assert_eq!(record.get(names::FLAGS), Some(&FieldValue::Integer(2)));
        assert_eq!(record.get(names::RATING), Some(&FieldValue::Integer(4)));
        assert_eq!(record.get(names::GENRE), Some(&FieldValue::Text("\"x\"".into())));
    }

    #[test]
    fn fields_iterate_in_layout_order() {
        let bytes = record_bytes("a.ogg", 0, None);
        let record = decode(&bytes).0.unwrap().unwrap();
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        let layout: Vec<_> = TRACK_LAYOUT.iter().map(|s| s.name).collect();
        assert_eq!(names, layout);
    }

    #[test]
    fn empty_file_name_is_sentinel() {
        // Bytes after the terminator belong to the next section.
        let (result, pos) = decode(&[0x00, b'C', b':', 0x00]);
        assert!(result.unwrap().is_none());
        assert_eq!(pos, 1);
    }

    #[test]
    fn end_of_input_is_sentinel() {
        let (result, _) = decode(&[]);
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn truncated_dword_names_field() {
        let mut bytes = record_bytes("a.ogg", 0, None);
        // Cut inside `duration`.
        let cut = bytes.iter().position(|&b| b == 0).unwrap() + 1 + 9 * 2 + 1 + 2;
        bytes.truncate(cut);

        let (result, _) = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated {
                field: names::DURATION,
                ..
            })
        ));
    }

    #[test]
    fn truncated_subsong_word_names_field() {
        let mut bytes = record_bytes("a.it", 1, Some((2, 1)));
        bytes.truncate(bytes.len() - 1);
        let (result, _) = decode(&bytes);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated {
                field: names::SUBSONG_NUMBER,
                ..
            })
        ));
    }
}
