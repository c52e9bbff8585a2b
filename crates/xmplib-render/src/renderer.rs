use std::io::Write;

use xmplib_decoder::TrackRecord;

use crate::config::{OutputMode, RenderConfig};
use crate::error::RenderError;
use crate::render_csv::CsvRenderer;
use crate::render_json::JsonLinesRenderer;

/// Core rendering interface: turns decoded track records into text lines.
///
/// Renderers work one record at a time so a caller can stream a large
/// library straight from the decoder to its output without holding every
/// record in memory.
///
/// ```text
/// Tracks ──▶ TrackRenderer::render_track() ──▶ one line per record
///                     │
///               RenderConfig
///               (mode, time_zone, header_row)
/// ```
///
/// Returned strings carry no trailing newline.
pub trait TrackRenderer {
    /// Line to emit before the first record, if the format has one.
    fn preamble(&self, config: &RenderConfig) -> Option<String>;

    /// Render one record.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the output encoder fails.
    fn render_track(
        &self,
        record: &TrackRecord,
        config: &RenderConfig,
    ) -> Result<String, RenderError>;

    /// Render one record and write it to `out` as a newline-terminated
    /// line.
    ///
    /// # Errors
    ///
    /// [`RenderError::Io`] if `out` fails, or any error from
    /// [`render_track`](Self::render_track).
    fn write_track(
        &self,
        out: &mut dyn Write,
        record: &TrackRecord,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        let line = self.render_track(record, config)?;
        writeln!(out, "{line}")?;
        Ok(())
    }

    /// Render a whole listing: preamble, then one line per record, each
    /// line newline-terminated.
    ///
    /// # Errors
    ///
    /// The first error from [`render_track`](Self::render_track).
    fn render_all(
        &self,
        records: &[TrackRecord],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        if let Some(line) = self.preamble(config) {
            out.push_str(&line);
            out.push('\n');
        }
        for record in records {
            out.push_str(&self.render_track(record, config)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Renderer that picks the concrete format from `config.mode`.
///
/// ```text
/// ┌───────────────┐     ┌────────────┐     ┌───────────────────┐
/// │ &TrackRecord  │────▶│ dispatch   │────▶│ CsvRenderer       │
/// │               │     │ on mode    │     │ JsonLinesRenderer │
/// └───────────────┘     └────────────┘     └───────────────────┘
/// ```
pub struct DefaultRenderer;

impl TrackRenderer for DefaultRenderer {
    fn preamble(&self, config: &RenderConfig) -> Option<String> {
        match config.mode {
            OutputMode::Csv if config.header_row => Some(CsvRenderer::header_row()),
            OutputMode::Csv | OutputMode::JsonLines => None,
        }
    }

    fn render_track(
        &self,
        record: &TrackRecord,
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        match config.mode {
            OutputMode::Csv => Ok(CsvRenderer::render_row(record, config.time_zone)),
            OutputMode::JsonLines => JsonLinesRenderer::render_object(record, config.time_zone),
        }
    }
}
