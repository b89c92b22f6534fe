//! Character-window chunking with overlap.
//!
//! `chunk` is a pure function of its arguments: the same text and parameters
//! always produce the same chunk sequence. It imposes no paragraph semantics;
//! callers that want blank-line boundaries pre-split with `split_sections`
//! and chunk each section separately.

use crate::error::{Error, Result};

/// Split `text` into overlapping windows of at most `max_chars` characters.
///
/// Line endings are normalized (`\r` stripped) and the text is trimmed before
/// splitting; empty input yields an empty sequence. Each window is trimmed
/// and dropped if blank. The scan advances by `max_chars - overlap`, so
/// `overlap >= max_chars` is rejected up front rather than looping forever.
pub fn chunk(text: &str, max_chars: usize, overlap: usize) -> Result<Vec<String>> {
    if max_chars == 0 {
        return Err(Error::InvalidConfiguration(
            "max_chars must be positive".to_string(),
        ));
    }
    if overlap >= max_chars {
        return Err(Error::InvalidConfiguration(format!(
            "overlap ({overlap}) must be smaller than max_chars ({max_chars})"
        )));
    }

    let normalized = text.replace('\r', "");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    // Window arithmetic is in characters, never bytes, so multi-byte text
    // cannot be split mid-code-point.
    let chars: Vec<char> = trimmed.chars().collect();
    let n = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + max_chars).min(n);
        let window: String = chars[start..end].iter().collect();
        let window = window.trim();
        if !window.is_empty() {
            chunks.push(window.to_string());
        }
        if end == n {
            break;
        }
        // end == start + max_chars here and max_chars > overlap, so the
        // scan always makes progress; the clamp mirrors start = end - overlap
        // never going negative.
        start = end.saturating_sub(overlap);
    }
    Ok(chunks)
}

/// Blank-line pre-split used before chunking: sections are `\n\n`-delimited,
/// trimmed, and blank sections are dropped.
pub fn split_sections(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
