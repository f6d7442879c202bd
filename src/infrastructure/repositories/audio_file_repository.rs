use crate::domain::tts::TtsProvider;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Characters of spoken text kept in a generated filename.
const FILENAME_TEXT_LIMIT: usize = 40;

/// Local store for generated audio, one file per card.
pub struct AudioFileRepository {
    assets_dir: PathBuf,
}

impl AudioFileRepository {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Write audio under the assets directory, creating it if needed.
    pub async fn save(&self, filename: &str, audio: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.assets_dir).await?;

        let path = self.assets_dir.join(filename);
        tokio::fs::write(&path, audio).await?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = audio.len(),
            "Audio file saved"
        );

        Ok(path)
    }
}

/// Lowercase ASCII slug of at most [`FILENAME_TEXT_LIMIT`] characters of `text`.
///
/// Every character outside `[a-zA-Z0-9]` becomes `-`, runs of `-` collapse, and
/// dashes at either end are dropped.
pub fn sanitize_filename(text: &str) -> String {
    let mut slug = String::with_capacity(FILENAME_TEXT_LIMIT);

    for c in text.chars().take(FILENAME_TEXT_LIMIT) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug.trim_matches('-').to_string()
}

/// `<provider>-generated-<slug>-<timestamp>.mp3`
pub fn audio_filename(provider: TtsProvider, text: &str, generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at.format("%Y-%m-%dT%H-%M-%S");
    let slug = sanitize_filename(text);

    if slug.is_empty() {
        format!("{}-generated-{}.mp3", provider, timestamp)
    } else {
        format!("{}-generated-{}-{}.mp3", provider, slug, timestamp)
    }
}
