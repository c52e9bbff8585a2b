/// Configuration for rendering a decoded library.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                              │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ mode       │ CSV (one line per track) or JSON Lines               │
/// │ time_zone  │ Zone timestamps are shown in                         │
/// │ header_row │ Emit the column-name line before CSV rows            │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// `header_row` has no effect in JSON Lines mode, where every object
/// carries its own keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub mode: OutputMode,
    pub time_zone: TimeZone,
    pub header_row: bool,
}

impl Default for RenderConfig {
    /// CSV with a header row, timestamps in local time.
    ///
    /// Local time matches what XMPlay itself shows for play and scan
    /// dates.
    fn default() -> Self {
        Self {
            mode: OutputMode::Csv,
            time_zone: TimeZone::Local,
            header_row: true,
        }
    }
}

/// Output format for the track listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Comma-separated, text cells pre-quoted by the decoder.
    #[default]
    Csv,
    /// One JSON object per line, keys in layout order.
    JsonLines,
}

/// Time zone used when formatting timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}
