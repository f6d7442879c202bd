use crate::domain::tts::TtsProvider;
use async_trait::async_trait;

/// Speech synthesis backend (OpenAI, AWS Polly).
///
/// Implementations split text longer than their provider's request limit and
/// return the batches' audio concatenated into one MP3 stream.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Provider behind this repository; decides the voice list and file prefix
    fn provider(&self) -> TtsProvider;

    /// Synthesize already cleaned text with a provider-specific voice name
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String>;
}
