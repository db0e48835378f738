// Output formatting: terminal display of predictions and training reports.

pub mod terminal;

/// First `max_chars` characters of `text`, with "..." appended when anything
/// was cut. Used for the 240-character `input_preview` and terminal echoes.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
