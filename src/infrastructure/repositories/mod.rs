pub mod anki_card_repository;
pub mod audio_file_repository;
pub mod batching;
pub mod card_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod tts_repository;

pub use anki_card_repository::AnkiCardRepository;
pub use audio_file_repository::{audio_filename, sanitize_filename, AudioFileRepository};
pub use card_repository::CardRepository;
pub use openai_tts_repository::{OpenAiTtsRepository, DEFAULT_OPENAI_TTS_MODEL};
pub use polly_tts_repository::PollyTtsRepository;
pub use tts_repository::TtsRepository;
