use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sound::contains_sound_tag;

/// A card as returned by the AnkiConnect `cardsInfo` action.
///
/// Only the keys this tool reads are modelled; the rest of the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: i64,
    pub note: i64,
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub value: String,
    #[serde(default)]
    pub order: u32,
}

impl CardInfo {
    /// Raw HTML of a field, if the field exists and is not empty.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|field| field.value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn has_audio(&self, field: &str) -> bool {
        self.field_value(field).is_some_and(contains_sound_tag)
    }
}
