use crate::error::AppError;
use crate::infrastructure::anki::AnkiError;

/// Failure of the enrichment run as a whole.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error(transparent)]
    Anki(#[from] AnkiError),
}

impl From<EnrichmentError> for AppError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::Anki(e) => AppError::Anki(e),
        }
    }
}

/// Why a single card could not be enriched. Recorded per card; never aborts a batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardProcessingError {
    #[error("card field '{0}' is missing or empty")]
    MissingField(String),
    #[error("card has no speakable text")]
    EmptyText,
    #[error("no voice available for provider {0}")]
    NoVoice(String),
    #[error("TTS generation error: {0}")]
    Synthesis(String),
    #[error("failed to save audio file: {0}")]
    Storage(String),
    #[error("failed to store media in Anki: {0}")]
    Media(String),
    #[error("failed to update note: {0}")]
    Update(String),
}
