use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::model::CardInfo;

static SOUND_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[sound:[^\]]+\]").expect("sound tag pattern is valid"));

/// True if the text references Anki media with a `[sound:...]` tag.
pub fn contains_sound_tag(text: &str) -> bool {
    SOUND_TAG.is_match(text)
}

pub fn remove_sound_tags(text: &str) -> String {
    SOUND_TAG.replace_all(text, "").into_owned()
}

/// Front field content with the new audio reference appended after a blank line.
pub fn append_sound_tag(front: &str, filename: &str) -> String {
    format!("{front}<br><br>[sound:{filename}]")
}

/// Keep the first card of every note, in their original order.
///
/// Sibling cards share the note's fields, so updating one of them is enough.
pub fn unique_by_note(cards: Vec<CardInfo>) -> Vec<CardInfo> {
    let mut seen_notes = HashSet::new();
    cards
        .into_iter()
        .filter(|card| seen_notes.insert(card.note))
        .collect()
}
