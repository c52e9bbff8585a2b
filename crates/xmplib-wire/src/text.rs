use std::fmt;

/// Text encoding used by every string field after the header.
///
/// Selected by bit 7 of the header's info-flags byte. Decoding is always
/// lossy: a malformed library should still dump, with replacement
/// characters where the bytes made no sense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    #[default]
    Ascii,
    Utf8,
}

impl TextEncoding {
    /// Decode `bytes`, replacing anything invalid with U+FFFD.
    ///
    /// For `Ascii`, every byte at or above 0x80 becomes one replacement
    /// character. For `Utf8`, each invalid sequence does.
    #[must_use]
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            Self::Ascii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Lowercase name, as shown in the metadata report.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turn plain text into a CSV cell.
///
/// Embedded `"` are doubled and the result is wrapped in `"`. The empty
/// string is returned as-is, with no wrapper, so emptiness survives
/// quoting.
///
/// | Input   | Output      |
/// |---------|-------------|
/// | ``      | ``          |
/// | `abc`   | `"abc"`     |
/// | `A"B`   | `"A""B"`    |
/// | `a,b`   | `"a,b"`     |
#[must_use]
pub fn quote_csv(plain: &str) -> String {
    if plain.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(plain.len() + 2);
    out.push('"');
    for ch in plain.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Inverse of [`quote_csv`].
///
/// Anything that is not a wrapped cell is returned unchanged.
#[must_use]
pub fn unquote_csv(cell: &str) -> String {
    match cell
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => cell.to_string(),
    }
}
