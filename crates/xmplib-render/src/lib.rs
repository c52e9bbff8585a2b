#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod render_csv;
pub mod render_json;
pub mod render_meta;
pub mod renderer;

mod timefmt;

pub use config::{OutputMode, RenderConfig, TimeZone};
pub use error::RenderError;
pub use render_meta::MetaReport;
pub use renderer::{DefaultRenderer, TrackRenderer};
