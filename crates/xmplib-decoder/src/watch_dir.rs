use std::io::Read;

use xmplib_wire::{ByteCursor, TextEncoding, Timestamp};

use crate::error::DecodeError;

/// Mode byte meaning "subfolders are watched too".
pub const MODE_WITH_SUBFOLDERS: u8 = 2;

/// A directory XMPlay watches for new files.
///
/// ```text
///   path (string, quoted like track text) │ mode (byte) │ FILETIME (8 bytes)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchDirEntry {
  pub path: String,
  pub includes_subfolders: bool,
  /// Last scan time. Unlike track timestamps there is no "never" value;
  /// a zero `FILETIME` shows up as 1601-01-01.
  pub last_updated: Timestamp,
}

/// Decode one watch-directory entry, or `None` at the empty-path sentinel.
///
/// # Errors
///
/// [`DecodeError::Truncated`] if the input ends after the path but before
/// the mode byte or timestamp.
pub fn decode_watch_dir<R: Read>(
  cursor: &mut ByteCursor<R>,
  encoding: TextEncoding,
) -> Result<Option<WatchDirEntry>, DecodeError> {
  let path = cursor
    .read_string(encoding)
    .map_err(|e| DecodeError::in_field("watch_dir.path", e))?;
  if path.is_empty() {
    return Ok(None);
  }

  let mode = cursor
    .read_byte()
    .map_err(|e| DecodeError::in_field("watch_dir.mode", e))?;
  let last_updated = cursor
    .read_filetime()
    .map_err(|e| DecodeError::in_field("watch_dir.last_updated", e))?;

  Ok(Some(WatchDirEntry {
    path,
    includes_subfolders: mode == MODE_WITH_SUBFOLDERS,
    last_updated,
  }))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry_bytes(path: &str, mode: u8, ticks: u64) -> Vec<u8> {
    let mut out = path.as_bytes().to_vec();
    out.push(0);
    out.push(mode);
    out.extend_from_slice(&ticks.to_le_bytes());
    out
  }

  #[test]
  fn decodes_entry_with_subfolders() {
    let bytes = entry_bytes("C:\\Music", 2, 0);
    let mut cursor = ByteCursor::new(&bytes[..]);
    let entry = decode_watch_dir(&mut cursor, TextEncoding::Ascii)
      .unwrap()
      .unwrap();

    assert_eq!(entry.path, "\"C:\\Music\"");
    assert!(entry.includes_subfolders);
    assert_eq!(entry.last_updated.unix_seconds(), -11_644_473_600);
    assert_eq!(cursor.position(), bytes.len() as u64);
  }

  #[test]
  fn only_mode_two_means_subfolders() {
    for mode in [0u8, 1, 3, 0xFF] {
      let bytes = entry_bytes("D:\\x", mode, 0);
      let entry = decode_watch_dir(&mut ByteCursor::new(&bytes[..]), TextEncoding::Ascii)
        .unwrap()
        .unwrap();
      assert!(!entry.includes_subfolders, "mode {mode}");
    }
  }

  #[test]
  fn empty_path_is_sentinel() {
    let mut cursor = ByteCursor::new(&[0x00, 0x02][..]);
    assert!(decode_watch_dir(&mut cursor, TextEncoding::Ascii).unwrap().is_none());
    assert_eq!(cursor.position(), 1);
  }

  #[test]
  fn missing_filetime_is_truncated() {
    let mut bytes = entry_bytes("C:\\Music", 2, 0);
    bytes.truncate(bytes.len() - 3);
    let result = decode_watch_dir(&mut ByteCursor::new(&bytes[..]), TextEncoding::Ascii);
    assert!(matches!(
      result,
      Err(DecodeError::Truncated {
        field: "watch_dir.last_updated",
        ..
      })
    ));
  }
}
