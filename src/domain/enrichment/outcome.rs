use super::error::CardProcessingError;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedCard {
    pub card_id: i64,
    pub note_id: i64,
    pub spoken_text: String,
    pub voice: String,
    /// Filename referenced by the new `[sound:...]` tag
    pub audio_filename: String,
    pub audio_path: PathBuf,
}

/// Result for one card of a batch, at its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct CardOutcome {
    pub index: usize,
    pub card_id: i64,
    pub result: Result<ProcessedCard, CardProcessingError>,
}

impl CardOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Card shown to the user before anything is modified.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPreview {
    /// Position in the candidate list, shared with [`CardOutcome::index`]
    pub index: usize,
    pub card_id: i64,
    pub spoken_text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[CardOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}
