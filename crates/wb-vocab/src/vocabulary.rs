use crate::{
    error::VocabError,
    matcher::TranslationMatcher,
    pair::{LanguagePairKey, VocabularyPair},
};

/// Ordered word/phrase pairs for one language pair.
///
/// Duplicates are allowed and insertion order is kept; lookups resolve
/// duplicates at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    key: LanguagePairKey,
    pairs: Vec<VocabularyPair>,
}

impl Vocabulary {
    pub fn new(key: LanguagePairKey) -> Self {
        Self {
            key,
            pairs: Vec::new(),
        }
    }

    pub fn with_pairs(key: LanguagePairKey, pairs: Vec<VocabularyPair>) -> Self {
        Self { key, pairs }
    }

    pub fn key(&self) -> &LanguagePairKey {
        &self.key
    }

    pub fn pairs(&self) -> &[VocabularyPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append a translation, placing both words by the alphabetical order of
    /// their languages.
    pub fn add_pair(
        &mut self,
        source_word: &str,
        source_lang: &str,
        target_word: &str,
        target_lang: &str,
    ) -> Result<(), VocabError> {
        let source_slot = self.key.require_slot(source_lang)?;
        let target_slot = self.key.require_slot(target_lang)?;
        if source_slot == target_slot {
            return Err(VocabError::InvalidPair(format!(
                "{source_lang}:{target_lang}"
            )));
        }

        self.pairs.push(VocabularyPair::oriented(
            source_word,
            source_lang,
            target_word,
            target_lang,
        ));
        Ok(())
    }

    /// Remove every pair whose `source_lang` word equals `source_word`,
    /// ignoring case. Returns how many pairs were dropped.
    pub fn remove_pairs_for_source_word(
        &mut self,
        source_word: &str,
        source_lang: &str,
    ) -> Result<usize, VocabError> {
        let slot = self.key.require_slot(source_lang)?;
        let needle = source_word.to_lowercase();

        let before = self.pairs.len();
        self.pairs
            .retain(|pair| pair.get(slot).to_lowercase() != needle);
        let removed = before - self.pairs.len();

        tracing::debug!(
            "Removed {} pair(s) for '{}' ({}) from {}",
            removed,
            source_word,
            source_lang,
            self.key
        );
        Ok(removed)
    }

    pub fn matcher(&self) -> TranslationMatcher<'_> {
        TranslationMatcher::new(&self.pairs, &self.key)
    }
}
