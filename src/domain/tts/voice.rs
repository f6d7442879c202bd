use serde::{Deserialize, Serialize};

/// Voices offered by OpenAI's speech endpoint.
pub const OPENAI_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// Neural-capable English voices on AWS Polly.
pub const POLLY_VOICES: &[&str] = &["Joanna", "Matthew", "Salli", "Joey", "Kendra", "Kimberly"];

/// Speech synthesis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    OpenAi,
    Polly,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::OpenAi => "openai",
            TtsProvider::Polly => "polly",
        }
    }

    pub fn voices(&self) -> &'static [&'static str] {
        match self {
            TtsProvider::OpenAi => OPENAI_VOICES,
            TtsProvider::Polly => POLLY_VOICES,
        }
    }
}

impl std::fmt::Display for TtsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(TtsProvider::OpenAi),
            "polly" | "aws" => Ok(TtsProvider::Polly),
            other => Err(format!("unknown TTS provider '{}' (expected openai or polly)", other)),
        }
    }
}

/// Pick the voice for a card.
///
/// A configured voice always wins. Otherwise the provider's voices rotate by card id,
/// so a deck gets a mix of speakers and re-running a card picks the same one.
pub fn select_voice(configured: Option<&str>, voices: &[&str], card_id: i64) -> Option<String> {
    if let Some(voice) = configured.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(voice.to_string());
    }

    if voices.is_empty() {
        return None;
    }

    let slot = card_id.rem_euclid(voices.len() as i64) as usize;
    Some(voices[slot].to_string())
}
