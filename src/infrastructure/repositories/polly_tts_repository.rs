use super::batching::synthesize_in_batches;
use super::tts_repository::TtsRepository;
use crate::domain::tts::TtsProvider;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;
use std::time::Instant;

/// Polly rejects longer `SynthesizeSpeech` input
const MAX_BATCH_SIZE: usize = 3000;

pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    async fn speak(&self, text: String, voice_id: VoiceId) -> Result<Vec<u8>, String> {
        let text_length = text.len();

        let output = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id.clone())
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice = voice_id.as_str(),
                    text_length = text_length,
                    "Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|e| format!("Failed to read Polly audio stream: {}", e))?;

        Ok(audio.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    fn provider(&self) -> TtsProvider {
        TtsProvider::Polly
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let started = Instant::now();
        let voice_id = VoiceId::from(voice);

        let (audio, batch_count) = synthesize_in_batches(text, MAX_BATCH_SIZE, |batch| {
            self.speak(batch, voice_id.clone())
        })
        .await?;

        tracing::info!(
            provider = "polly",
            voice = voice,
            engine = "neural",
            latency_ms = started.elapsed().as_millis() as u64,
            characters_count = text.len(),
            batch_count = batch_count,
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
