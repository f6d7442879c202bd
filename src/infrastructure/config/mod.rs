use crate::domain::tts::TtsProvider;
use crate::infrastructure::anki::{RetryPolicy, DEFAULT_ANKI_CONNECT_URL};
use crate::infrastructure::repositories::DEFAULT_OPENAI_TTS_MODEL;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CARD_QUERY: &str = "-deck:\"+170 English Irregular verbs\"";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // AnkiConnect
    pub anki_connect_url: String,
    pub anki_request_delay_ms: u64,
    pub anki_retry_delay_ms: u64,
    pub anki_max_attempts: u32,
    // Card selection
    pub card_query: String,
    pub front_field: String,
    pub max_cards: usize,
    pub max_concurrent: usize,
    // Audio
    pub assets_dir: PathBuf,
    pub tts_provider: TtsProvider,
    pub tts_voice: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub aws_region: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Config {
            anki_connect_url: var("ANKI_CONNECT_URL", DEFAULT_ANKI_CONNECT_URL),
            anki_request_delay_ms: var("ANKI_REQUEST_DELAY_MS", "1000").parse()?,
            anki_retry_delay_ms: var("ANKI_RETRY_DELAY_MS", "2000").parse()?,
            anki_max_attempts: var("ANKI_MAX_ATTEMPTS", "3").parse()?,
            card_query: var("CARD_QUERY", DEFAULT_CARD_QUERY),
            front_field: var("FRONT_FIELD", "Front"),
            max_cards: var("MAX_CARDS", "100").parse()?,
            max_concurrent: var("MAX_CONCURRENT", "10").parse()?,
            assets_dir: PathBuf::from(var("ASSETS_DIR", "assets")),
            tts_provider: var("TTS_PROVIDER", "openai").parse::<TtsProvider>()?,
            tts_voice: optional("TTS_VOICE"),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_tts_model: var("OPENAI_TTS_MODEL", DEFAULT_OPENAI_TTS_MODEL),
            aws_region: var("AWS_REGION", "eu-west-1"),
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            request_delay: Duration::from_millis(self.anki_request_delay_ms),
            retry_delay: Duration::from_millis(self.anki_retry_delay_ms),
            max_attempts: self.anki_max_attempts,
        }
    }
}
