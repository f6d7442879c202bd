pub mod card;
pub mod enrichment;
pub mod spoken_text;
pub mod tts;
