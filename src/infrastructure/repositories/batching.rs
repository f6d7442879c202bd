use once_cell::sync::Lazy;
use regex::Regex;
use std::future::Future;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?]+\s+)").expect("sentence end pattern is valid"));

/// Pieces of `text` that each end after a sentence terminator and its trailing space.
/// The last piece holds whatever follows the final terminator.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut ends: Vec<usize> = SENTENCE_END.find_iter(text).map(|m| m.end()).collect();
    ends.push(text.len());

    let mut start = 0;
    ends.into_iter().filter_map(move |end| {
        if end <= start {
            return None;
        }
        let piece = &text[start..end];
        start = end;
        Some(piece)
    })
}

fn flush(batches: &mut Vec<String>, current: &mut String) {
    let batch = std::mem::take(current);
    let batch = batch.trim();
    if !batch.is_empty() {
        batches.push(batch.to_string());
    }
}

/// Greedily pack whole sentences into batches of at most `max_batch_size` bytes.
/// A sentence that alone exceeds the limit is cut on character boundaries.
pub fn split_into_batches(text: &str, max_batch_size: usize) -> Vec<String> {
    if text.len() <= max_batch_size {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        if sentence.len() > max_batch_size {
            flush(&mut batches, &mut current);
            for mut chunk in chunk_by_bytes(sentence, max_batch_size) {
                flush(&mut batches, &mut chunk);
            }
            continue;
        }
        if current.len() + sentence.len() > max_batch_size {
            flush(&mut batches, &mut current);
        }
        current.push_str(sentence);
    }
    flush(&mut batches, &mut current);

    batches
}

/// Cut text with no sentence boundary into pieces of at most `max_bytes`,
/// never splitting a character.
fn chunk_by_bytes(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if !current.is_empty() && current.len() + c.len_utf8() > max_bytes {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(c);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Synthesize `text` one batch at a time and concatenate the MP3 output.
///
/// Stops at the first failing batch.
pub async fn synthesize_in_batches<F, Fut>(
    text: &str,
    max_batch_size: usize,
    mut synthesize_batch: F,
) -> Result<(Vec<u8>, usize), String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<u8>, String>>,
{
    let batches = split_into_batches(text, max_batch_size);
    let batch_count = batches.len();

    let mut audio = Vec::new();
    for (index, batch) in batches.into_iter().enumerate() {
        tracing::debug!(batch_index = index, batch_size = batch.len(), "Synthesizing batch");
        audio.extend(synthesize_batch(batch).await?);
    }

    Ok((audio, batch_count))
}
