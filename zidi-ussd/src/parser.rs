//! Accumulated input tokenizer.

/// Splits the accumulated dial-string into its ordered tokens.
///
/// The gateway joins every keystroke the session has made with `*`, so
/// `"2*1"` means "picked option 2, then entered 1". Empty input means the
/// session just opened and the root menu applies. Any string is valid
/// here; malformed tokens are rejected by the menu, not the parser.
pub fn tokens(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('*').collect()
}
