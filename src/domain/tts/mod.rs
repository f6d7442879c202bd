pub mod voice;

pub use voice::{select_voice, TtsProvider, OPENAI_VOICES, POLLY_VOICES};
