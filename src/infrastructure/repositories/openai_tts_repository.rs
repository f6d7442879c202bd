use super::batching::synthesize_in_batches;
use super::tts_repository::TtsRepository;
use crate::domain::tts::TtsProvider;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Longest input the speech endpoint accepts in one request
const MAX_BATCH_SIZE: usize = 4096;

pub const DEFAULT_OPENAI_TTS_MODEL: &str = "tts-1";

pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    async fn speak(&self, input: String, voice: Voice) -> Result<Vec<u8>, String> {
        let input_chars = input.chars().count();
        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input,
            voice,
            response_format: Some(SpeechResponseFormat::Mp3),
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                input_chars = input_chars,
                "OpenAI speech request failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

/// Map a voice name onto the SDK enum; unknown names fall back to `alloy`.
fn parse_voice(voice: &str) -> Voice {
    match voice.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        other => {
            tracing::warn!(voice = other, "Unknown OpenAI voice, using alloy");
            Voice::Alloy
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    fn provider(&self) -> TtsProvider {
        TtsProvider::OpenAi
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let started = Instant::now();
        let sdk_voice = parse_voice(voice);

        let (audio, batch_count) = synthesize_in_batches(text, MAX_BATCH_SIZE, |batch| {
            self.speak(batch, sdk_voice.clone())
        })
        .await?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = voice,
            latency_ms = started.elapsed().as_millis() as u64,
            characters_count = text.len(),
            batch_count = batch_count,
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(audio)
    }
}
