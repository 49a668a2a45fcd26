//! Small string helpers shared across layers

/// Truncate document text for prompt context: keep the head and tail
/// with an elision marker between them, so both the framing and the
/// conclusions survive. Cuts at char boundaries.
pub fn truncate_for_context(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }

    let head_len = max_chars / 2;
    let tail_len = max_chars - head_len;
    let head: String = text.chars().take(head_len).collect();
    let tail: String = text
        .chars()
        .skip(len - tail_len)
        .collect();

    format!("{head}\n\n... [document truncated] ...\n\n{tail}")
}

/// Clip a string to `max_chars` characters, appending an ellipsis when
/// anything was removed.
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(max_chars).collect();
        format!("{clipped}...")
    }
}
