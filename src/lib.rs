pub mod cli;
pub mod controllers;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::spoken_text::render_html;
