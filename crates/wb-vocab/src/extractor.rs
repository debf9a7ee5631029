//! Picks the words and phrases of a prompt that deserve translation help.

use serde::{Deserialize, Serialize};

use crate::{
    matcher::TranslationMatcher,
    pair::TOMBSTONE,
    tokenizer::clean_words,
};

/// Words shorter than this never pull in their related phrases.
const MIN_PHRASE_TRIGGER_LENGTH: usize = 3;

/// An extracted word or phrase with its currently known translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub text: String,
    /// Empty when unknown, [`TOMBSTONE`] when marked as untranslatable.
    pub translation: String,
}

/// Ordered, de-duplicated vocabulary entries for `prompt`.
///
/// Single greedy pass over the prompt tokens. At each position the first
/// stored phrase (in store order) that matches the following tokens wins and
/// consumes them; other segmentations are never tried.
pub fn extract(prompt: &str, lang: &str, matcher: &TranslationMatcher<'_>) -> Vec<String> {
    let words = clean_words(prompt);
    let mut found: Vec<String> = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let word = &words[i];
        let exact = matcher.lookup_exact(word, lang);
        let tomb = exact == TOMBSTONE;
        let related = matcher.find_related_phrases(word, lang);

        if related.is_empty() {
            if !tomb {
                found.push(word.clone());
            }
            if tomb || exact.is_empty() {
                found.extend(matcher.find_related_by_chop(word, lang));
            }
            i += 1;
            continue;
        }

        if let Some((phrase, consumed)) = phrase_at(&words[i..], &related) {
            found.push(phrase.to_string());
            i += consumed;
            continue;
        }

        if !tomb {
            found.push(word.clone());
        }
        if exact.is_empty() && word.chars().count() >= MIN_PHRASE_TRIGGER_LENGTH {
            found.extend(related);
        }
        i += 1;
    }

    let extracted = dedup_preserving_order(found);
    tracing::debug!(
        "Extracted {} vocabulary entries from a {}-word prompt",
        extracted.len(),
        words.len()
    );
    extracted
}

/// Like [`extract`], pairing each entry with its exact translation.
pub fn extract_entries(
    prompt: &str,
    lang: &str,
    matcher: &TranslationMatcher<'_>,
) -> Vec<VocabularyEntry> {
    extract(prompt, lang, matcher)
        .into_iter()
        .map(|text| {
            let translation = matcher.lookup_exact(&text, lang);
            VocabularyEntry { text, translation }
        })
        .collect()
}

/// First phrase whose tokens line up with the start of `words`, along with
/// the number of tokens it covers.
fn phrase_at<'p>(words: &[String], phrases: &'p [String]) -> Option<(&'p str, usize)> {
    phrases.iter().find_map(|phrase| {
        let tokens = clean_words(phrase);
        let matches = !tokens.is_empty()
            && tokens.len() <= words.len()
            && tokens
                .iter()
                .zip(words)
                .all(|(token, word)| token.to_lowercase() == word.to_lowercase());
        matches.then_some((phrase.as_str(), tokens.len()))
    })
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
