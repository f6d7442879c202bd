use crate::domain::card::CardInfo;
use crate::infrastructure::anki::AnkiError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Repository for the flashcard collection.
/// Abstracts the card database (AnkiConnect in production).
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Ids of the cards matching an Anki search query
    async fn find_cards(&self, query: &str) -> Result<Vec<i64>, AnkiError>;

    async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>, AnkiError>;

    /// Overwrite the given fields of a note; fields not listed are untouched
    async fn update_note_fields(
        &self,
        note_id: i64,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), AnkiError>;

    /// Store an audio file in the collection's media folder
    ///
    /// Returns the filename Anki stored it under.
    async fn store_media_file(&self, filename: &str, data: &[u8]) -> Result<String, AnkiError>;
}
