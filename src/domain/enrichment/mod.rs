pub mod error;
pub mod outcome;
pub mod service;

pub use error::{CardProcessingError, EnrichmentError};
pub use outcome::{BatchSummary, CardOutcome, CardPreview, ProcessedCard};
pub use service::{spoken_text_for, EnrichmentService, EnrichmentSettings};
