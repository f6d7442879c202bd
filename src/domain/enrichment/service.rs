use super::error::{CardProcessingError, EnrichmentError};
use super::outcome::{CardOutcome, CardPreview, ProcessedCard};
use crate::domain::card::{append_sound_tag, remove_sound_tags, unique_by_note, CardInfo};
use crate::domain::spoken_text::render_html;
use crate::domain::tts::select_voice;
use crate::infrastructure::repositories::{
    audio_filename, AudioFileRepository, CardRepository, TtsRepository,
};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentSettings {
    /// Anki search query selecting the candidate cards
    pub query: String,
    /// Field holding the text to speak; the sound tag is appended to it
    pub front_field: String,
    pub max_cards: usize,
    pub max_concurrent: usize,
    /// Fixed voice; `None` rotates through the provider's voices
    pub voice: Option<String>,
}

/// Text sent to the speech provider for a front field.
pub fn spoken_text_for(front: &str) -> String {
    render_html(&remove_sound_tags(front))
}

pub struct EnrichmentService {
    card_repo: Arc<dyn CardRepository>,
    tts_repo: Arc<dyn TtsRepository>,
    audio_repo: Arc<AudioFileRepository>,
    settings: EnrichmentSettings,
}

impl EnrichmentService {
    pub fn new(
        card_repo: Arc<dyn CardRepository>,
        tts_repo: Arc<dyn TtsRepository>,
        audio_repo: Arc<AudioFileRepository>,
        settings: EnrichmentSettings,
    ) -> Self {
        Self {
            card_repo,
            tts_repo,
            audio_repo,
            settings,
        }
    }

    /// Cards matching the query whose front has no audio yet, one per note.
    pub async fn find_candidates(&self) -> Result<Vec<CardInfo>, EnrichmentError> {
        let mut card_ids = self.card_repo.find_cards(&self.settings.query).await?;
        let matched = card_ids.len();
        card_ids.truncate(self.settings.max_cards);

        let cards = self.card_repo.cards_info(&card_ids).await?;
        let without_audio: Vec<CardInfo> = cards
            .into_iter()
            .filter(|card| !card.has_audio(&self.settings.front_field))
            .collect();
        let without_audio_count = without_audio.len();
        let candidates = unique_by_note(without_audio);

        tracing::info!(
            query = %self.settings.query,
            matched = matched,
            inspected = card_ids.len(),
            without_audio = without_audio_count,
            unique_notes = candidates.len(),
            "Candidate cards collected"
        );

        Ok(candidates)
    }

    /// What would be spoken for each card that has a front field.
    pub fn preview(&self, cards: &[CardInfo]) -> Vec<CardPreview> {
        cards
            .iter()
            .enumerate()
            .filter_map(|(index, card)| {
                card.field_value(&self.settings.front_field)
                    .map(|front| CardPreview {
                        index,
                        card_id: card.card_id,
                        spoken_text: spoken_text_for(front),
                    })
            })
            .collect()
    }

    /// Process every card with at most `max_concurrent` in flight.
    ///
    /// A free slot immediately picks up the next card. Outcomes come back in input
    /// order and failed cards never stop the rest.
    pub async fn process_batch(&self, cards: &[CardInfo]) -> Vec<CardOutcome> {
        let slots = self.settings.max_concurrent.max(1);

        let mut outcomes: Vec<CardOutcome> = stream::iter(cards.iter().enumerate())
            .map(|(index, card)| async move {
                let result = self.process_card(index, card).await;
                if let Err(e) = &result {
                    tracing::error!(
                        card_index = index + 1,
                        card_id = card.card_id,
                        error = %e,
                        "Failed to process card"
                    );
                }
                CardOutcome {
                    index,
                    card_id: card.card_id,
                    result,
                }
            })
            .buffer_unordered(slots)
            .collect()
            .await;

        outcomes.sort_by_key(|outcome| outcome.index);
        outcomes
    }

    /// Generate audio for one card and attach it to the card's note.
    pub async fn process_card(
        &self,
        index: usize,
        card: &CardInfo,
    ) -> Result<ProcessedCard, CardProcessingError> {
        let front_field = &self.settings.front_field;
        let front = card
            .field_value(front_field)
            .ok_or_else(|| CardProcessingError::MissingField(front_field.clone()))?;

        let spoken_text = spoken_text_for(front);
        if spoken_text.is_empty() {
            return Err(CardProcessingError::EmptyText);
        }

        let provider = self.tts_repo.provider();
        let voice = select_voice(self.settings.voice.as_deref(), provider.voices(), card.card_id)
            .ok_or_else(|| CardProcessingError::NoVoice(provider.to_string()))?;

        tracing::info!(
            card_index = index + 1,
            card_id = card.card_id,
            voice = %voice,
            text = %spoken_text,
            "Generating audio"
        );

        let audio = self
            .tts_repo
            .synthesize(&spoken_text, &voice)
            .await
            .map_err(CardProcessingError::Synthesis)?;

        let filename = audio_filename(provider, &spoken_text, Utc::now());
        let audio_path = self
            .audio_repo
            .save(&filename, &audio)
            .await
            .map_err(|e| CardProcessingError::Storage(e.to_string()))?;

        let stored_filename = self
            .card_repo
            .store_media_file(&filename, &audio)
            .await
            .map_err(|e| CardProcessingError::Media(e.to_string()))?;

        let mut fields = BTreeMap::new();
        fields.insert(front_field.clone(), append_sound_tag(front, &stored_filename));
        self.card_repo
            .update_note_fields(card.note, &fields)
            .await
            .map_err(|e| CardProcessingError::Update(e.to_string()))?;

        tracing::info!(
            card_index = index + 1,
            card_id = card.card_id,
            audio_filename = %stored_filename,
            "Added audio"
        );

        Ok(ProcessedCard {
            card_id: card.card_id,
            note_id: card.note,
            spoken_text,
            voice,
            audio_filename: stored_filename,
            audio_path,
        })
    }
}
