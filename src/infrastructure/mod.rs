pub mod anki;
pub mod config;
pub mod repositories;
