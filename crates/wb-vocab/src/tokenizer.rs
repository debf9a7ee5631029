//! Sentence tokenization.
//!
//! Everything here is a pure, total function over strings: malformed or empty
//! input degrades to an empty result instead of an error.

/// Characters stripped by [`remove_punctuation`].
///
/// The straight double quote is included on purpose: [`clean`] folds curly
/// quotes into it first, so every double quote ends up stripped.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', '¿', '¡', '—', '–', '(', ')', '"'];

/// Trim whitespace and fold typographic quotes into their ASCII forms.
pub fn clean(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            other => other,
        })
        .collect()
}

/// [`clean`] the text and strip the [`PUNCTUATION`] set.
///
/// The result is trimmed again so that applying it twice is a no-op.
pub fn remove_punctuation(text: &str) -> String {
    clean(text)
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split on runs of whitespace, dropping empty tokens.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Punctuation-free tokens, used for matching and for the word bank.
pub fn clean_words(text: &str) -> Vec<String> {
    split_words(&remove_punctuation(text))
}

/// Tokens that keep their original punctuation and casing, used for display.
pub fn display_words(text: &str) -> Vec<String> {
    split_words(&clean(text))
}
