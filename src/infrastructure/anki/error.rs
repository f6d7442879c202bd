#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("AnkiConnect request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AnkiConnect returned HTTP {status} for {action}")]
    Status { action: String, status: u16 },

    #[error("AnkiConnect error ({action}): {message}")]
    Api { action: String, message: String },

    #[error("unexpected AnkiConnect result for {action}: {message}")]
    Decode { action: String, message: String },

    #[error("{action} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        action: String,
        attempts: u32,
        source: Box<AnkiError>,
    },
}

impl AnkiError {
    /// The error behind any retry wrapping.
    pub fn root(&self) -> &AnkiError {
        match self {
            AnkiError::RetriesExhausted { source, .. } => source.root(),
            other => other,
        }
    }
}
