use super::card_repository::CardRepository;
use crate::domain::card::CardInfo;
use crate::infrastructure::anki::{AnkiConnectClient, AnkiError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

/// AnkiConnect implementation of the card repository
pub struct AnkiCardRepository {
    client: Arc<AnkiConnectClient>,
}

impl AnkiCardRepository {
    pub fn new(client: Arc<AnkiConnectClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CardRepository for AnkiCardRepository {
    async fn find_cards(&self, query: &str) -> Result<Vec<i64>, AnkiError> {
        let card_ids: Vec<i64> = self
            .client
            .invoke("findCards", json!({ "query": query }))
            .await?;

        tracing::debug!(query = query, found = card_ids.len(), "Cards found");
        Ok(card_ids)
    }

    async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>, AnkiError> {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.client
            .invoke("cardsInfo", json!({ "cards": card_ids }))
            .await
    }

    async fn update_note_fields(
        &self,
        note_id: i64,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), AnkiError> {
        let _: serde_json::Value = self
            .client
            .invoke(
                "updateNoteFields",
                json!({ "note": { "id": note_id, "fields": fields } }),
            )
            .await?;

        tracing::debug!(note_id = note_id, "Note fields updated");
        Ok(())
    }

    async fn store_media_file(&self, filename: &str, data: &[u8]) -> Result<String, AnkiError> {
        let stored: Option<String> = self
            .client
            .invoke(
                "storeMediaFile",
                json!({ "filename": filename, "data": BASE64.encode(data) }),
            )
            .await?;

        tracing::debug!(
            filename = filename,
            size_bytes = data.len(),
            "Media file stored"
        );

        // Older AnkiConnect versions answer with a null result.
        Ok(stored.unwrap_or_else(|| filename.to_string()))
    }
}
