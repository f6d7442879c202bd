//! Ordered transformation stages used by [`super::render_html`].
//!
//! Every stage is a pure `&str -> String` (or `&str -> &str`) function so it can be
//! exercised on its own; the pipeline in `mod.rs` fixes their order.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>").expect("line break pattern is valid"));

static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|div|h[1-6]|li)\s*>").expect("block end pattern is valid")
});

static EMBEDDED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>|<script\b[^>]*>.*?</script\s*>")
        .expect("embedded block pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").expect("whitespace pattern is valid"));

static TRANSCRIPTION_BEFORE_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/[^/]+/,").expect("transcription comma pattern is valid"));

// Anchored: only ever matched against a suffix starting at the candidate position.
static TRANSCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ ?/[^/]+/ ?").expect("transcription pattern is valid"));

static SPACE_BEFORE_TERMINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+([.!?])").expect("terminal punctuation pattern is valid"));

const IDIOM_MARKER: &str = ".idiom";

/// Whitespace as the patterns above see it: Unicode white space plus the BOM.
fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn trim_spaces(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Drop one quote character wrapping the whole input, when the same quote opens and closes it.
pub fn strip_wrapping_quotes(markup: &str) -> &str {
    for quote in ['\'', '"'] {
        if markup.len() >= 2 && markup.starts_with(quote) && markup.ends_with(quote) {
            return &markup[1..markup.len() - 1];
        }
    }
    markup
}

/// Turn line breaks and block ends into `\n` and drop style/script blocks, before parsing.
pub fn linearize(markup: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(markup, "\n");
    let with_block_ends = BLOCK_END.replace_all(&with_breaks, "\n");
    EMBEDDED_BLOCK.replace_all(&with_block_ends, "").into_owned()
}

/// First line that is non-empty once trimmed.
pub fn first_line(text: &str) -> Option<&str> {
    text.split('\n').map(trim_spaces).find(|line| !line.is_empty())
}

pub fn remove_idiom_markers(line: &str) -> String {
    line.replace(IDIOM_MARKER, "")
}

pub fn collapse_whitespace(line: &str) -> String {
    WHITESPACE.replace_all(line, " ").into_owned()
}

/// `word /ipa/, rest` keeps the comma: the transcription and comma become `" ,"`.
pub fn drop_transcription_before_comma(line: &str) -> String {
    TRANSCRIPTION_BEFORE_COMMA
        .replace_all(line, " ,")
        .into_owned()
}

/// Remove slash-delimited transcriptions, plus at most one space on either side.
///
/// A candidate is skipped when the character right before it is an ASCII letter, so
/// in-word slashes such as `front/rear` survive. The check always looks at the
/// original line, and scanning resumes after each removed transcription.
pub fn remove_transcriptions(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied_up_to = 0;
    let mut cursor = 0;

    while cursor < line.len() {
        let follows_letter = line[..cursor]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic());

        if !follows_letter {
            if let Some(found) = TRANSCRIPTION.find(&line[cursor..]) {
                out.push_str(&line[copied_up_to..cursor]);
                out.push(' ');
                cursor += found.end();
                copied_up_to = cursor;
                continue;
            }
        }

        cursor += line[cursor..].chars().next().map_or(1, char::len_utf8);
    }

    out.push_str(&line[copied_up_to..]);
    out
}

/// Join `.`, `!` and `?` to the preceding word.
pub fn attach_terminal_punctuation(line: &str) -> String {
    SPACE_BEFORE_TERMINAL.replace_all(line, "$1").into_owned()
}
