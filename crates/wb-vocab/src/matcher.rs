//! Translation lookups against a vocabulary snapshot.
//!
//! Three strategies of increasing looseness are offered:
//!
//! * [`TranslationMatcher::lookup_exact`] - case-insensitive equality
//! * [`TranslationMatcher::find_related_phrases`] - the word appears as a
//!   standalone word inside a stored phrase
//! * [`TranslationMatcher::find_related_by_chop`] - a cheap bidirectional
//!   stemming heuristic that tolerates inflection
//!
//! A language that is not part of the pair degrades to empty results.

use crate::pair::{LanguagePairKey, TOMBSTONE, VocabularyPair};

/// Words shorter than this are never stem-matched.
const MIN_CHOP_LENGTH: usize = 4;
/// Words longer than this get their tail chopped before stem matching.
const CHOP_THRESHOLD: usize = 5;
/// Share of the word (in percent) dropped from the end by [`chop`].
const CHOP_PERCENT: usize = 46;

/// Read-only view over the pairs of one language pair.
#[derive(Debug, Clone, Copy)]
pub struct TranslationMatcher<'a> {
    pairs: &'a [VocabularyPair],
    key: &'a LanguagePairKey,
}

impl<'a> TranslationMatcher<'a> {
    pub fn new(pairs: &'a [VocabularyPair], key: &'a LanguagePairKey) -> Self {
        Self { pairs, key }
    }

    pub fn key(&self) -> &LanguagePairKey {
        self.key
    }

    /// All known translations of `word`, joined with `", "`.
    ///
    /// Returns [`TOMBSTONE`] as soon as any matching pair marks the word as
    /// untranslated, and an empty string when nothing matches.
    pub fn lookup_exact(&self, word: &str, lang: &str) -> String {
        let Some(slot) = self.key.slot_of(lang) else {
            return String::new();
        };
        let needle = word.to_lowercase();

        let mut translations: Vec<&str> = Vec::new();
        for pair in self.pairs {
            if pair.get(slot).to_lowercase() != needle {
                continue;
            }
            let translation = pair.get(slot.opposite());
            if translation == TOMBSTONE {
                return TOMBSTONE.to_string();
            }
            if !translations.contains(&translation) {
                translations.push(translation);
            }
        }

        translations.join(", ")
    }

    /// Stored `lang` entries that contain `word` as a standalone word.
    ///
    /// Returns the containing entries themselves (not their translations),
    /// in store order and without duplicates. Entries whose translation is
    /// the tombstone are left out, as is an entry spelled exactly like
    /// `word`; one differing only in case is kept.
    pub fn find_related_phrases(&self, word: &str, lang: &str) -> Vec<String> {
        let Some(slot) = self.key.slot_of(lang) else {
            return Vec::new();
        };
        let needle = word.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut related: Vec<String> = Vec::new();
        for pair in self.pairs {
            if pair.is_tombstone(slot.opposite()) {
                continue;
            }
            let entry = pair.get(slot);
            if entry == word || !contains_standalone(&entry.to_lowercase(), &needle) {
                continue;
            }
            if !related.iter().any(|r| r == entry) {
                related.push(entry.to_string());
            }
        }
        related
    }

    /// Single-word `lang` entries sharing a chopped stem with `word`.
    pub fn find_related_by_chop(&self, word: &str, lang: &str) -> Vec<String> {
        let Some(slot) = self.key.slot_of(lang) else {
            return Vec::new();
        };
        if word.chars().count() < MIN_CHOP_LENGTH {
            return Vec::new();
        }

        let lowered_word = word.to_lowercase();
        let word_stem = chop(&lowered_word);

        let mut related: Vec<String> = Vec::new();
        for pair in self.pairs {
            let entry = pair.get(slot);
            if entry.contains(char::is_whitespace)
                || entry.chars().count() < MIN_CHOP_LENGTH
                || pair.is_tombstone(slot.opposite())
            {
                continue;
            }

            let lowered_entry = entry.to_lowercase();
            if lowered_entry == lowered_word {
                continue;
            }

            let matches = lowered_entry.starts_with(word_stem)
                || lowered_word.starts_with(chop(&lowered_entry));
            if matches && !related.iter().any(|r| r == entry) {
                related.push(entry.to_string());
            }
        }
        related
    }
}

/// Letters for the purpose of word boundaries: ASCII plus the Latin-1
/// supplement and extended Latin ranges (code points 192-687).
fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (192..=687).contains(&u32::from(c))
}

/// `haystack` contains `needle` with a non-letter (or nothing) on each side.
///
/// Every start position is tried, so overlapping occurrences count too.
fn contains_standalone(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.char_indices().any(|(start, _)| {
        if !haystack[start..].starts_with(needle) {
            return false;
        }
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(is_letter) && !after.is_some_and(is_letter)
    })
}

/// Approximate root: words longer than five characters lose their trailing
/// 46% (rounded down).
fn chop(word: &str) -> &str {
    let len = word.chars().count();
    if len <= CHOP_THRESHOLD {
        return word;
    }
    let keep = len - len * CHOP_PERCENT / 100;
    match word.char_indices().nth(keep) {
        Some((byte_index, _)) => &word[..byte_index],
        None => word,
    }
}
