// Output formatting: terminal display and log-safe text previews.

pub mod terminal;

/// Shorten `text` to at most `max_chars` characters for logs and tables,
/// appending "..." when something was cut.
///
/// Counts chars, not bytes, so accented Creole/French text and emoji never
/// split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
