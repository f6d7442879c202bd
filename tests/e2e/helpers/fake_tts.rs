use anki_tts::domain::tts::TtsProvider;
use anki_tts::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Mutex;

/// Speech provider that returns a fixed MP3 frame
#[derive(Default)]
pub struct FakeTts {
    fail_on: Mutex<Option<String>>,
    spoken: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl FakeTts {
    /// Fail synthesis for exactly this text
    pub fn fail_on(&self, text: &str) {
        *self.fail_on.lock().unwrap() = Some(text.to_string());
    }

    /// (text, voice) pairs synthesized so far
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

pub fn mock_audio_bytes() -> Vec<u8> {
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00,
    ]
}

#[async_trait]
impl TtsRepository for FakeTts {
    fn provider(&self) -> TtsProvider {
        TtsProvider::OpenAi
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        if self.fail_on.lock().unwrap().as_deref() == Some(text) {
            return Err("rate limit reached".to_string());
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));
        Ok(mock_audio_bytes())
    }
}
