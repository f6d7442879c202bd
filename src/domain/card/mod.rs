pub mod model;
pub mod sound;

pub use model::{CardInfo, FieldValue};
pub use sound::{append_sound_tag, contains_sound_tag, remove_sound_tags, unique_by_note};
