/// Errors that can occur while rendering decoded records.
///
/// Decoding has already succeeded by the time a renderer runs, so the only
/// failures left are in the output encoders and the sink they write to.
///
/// ```text
///   RenderError
///   ├── Io(io::Error)           ← output sink rejected a write
///   └── Json(serde_json::Error) ← JSON encoder failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write rendered output: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}
