//! Flashcard HTML to a single line of speakable text.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. strip one pair of quotes wrapping the whole input
//! 2. turn `<br>` and closing block tags into newlines, drop `<style>`/`<script>`
//! 3. parse the fragment and keep its decoded text
//! 4. keep the first non-empty line
//! 5. lexical cleanup: idiom markers, whitespace, phonetic transcriptions,
//!    punctuation spacing
//!
//! Card fronts put the term or sentence first and notes (part of speech, a second
//! example) after it, so only the first line is ever spoken.

pub mod markup;
pub mod stages;

pub use markup::extract_text;

/// Render card markup into the text sent to the speech provider.
///
/// Never fails: markup-free input comes back whitespace-collapsed and trimmed, and
/// input without any text comes back empty.
pub fn render_html(markup: &str) -> String {
    let markup = stages::strip_wrapping_quotes(markup);
    let linear = stages::linearize(markup);
    let text = extract_text(&linear);

    match stages::first_line(&text) {
        Some(line) => clean_line(line),
        None => String::new(),
    }
}

/// Lexical cleanup of one extracted line. Later rules rely on earlier ones having
/// normalized whitespace.
pub fn clean_line(line: &str) -> String {
    let line = stages::remove_idiom_markers(line);
    let line = stages::collapse_whitespace(&line);
    let line = stages::drop_transcription_before_comma(&line);
    let line = stages::remove_transcriptions(&line);
    let line = stages::attach_terminal_punctuation(&line);
    let line = stages::collapse_whitespace(&line);
    stages::trim_spaces(&line).to_string()
}
