use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::VocabError;

/// Value meaning "deliberately no translation recorded".
pub const TOMBSTONE: &str = "---";

/// Position of a language inside a [`LanguagePairKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The alphabetically first language.
    Primary,
    /// The alphabetically second language.
    Secondary,
}

impl Slot {
    pub fn opposite(self) -> Self {
        match self {
            Slot::Primary => Slot::Secondary,
            Slot::Secondary => Slot::Primary,
        }
    }
}

/// Canonical identifier of a vocabulary collection.
///
/// Both codes are lower-cased and sorted alphabetically, so `("es", "EN")` and
/// `("en", "es")` produce the same key, rendered as `"en:es"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguagePairKey {
    primary: String,
    secondary: String,
}

impl LanguagePairKey {
    pub fn new(lang_a: &str, lang_b: &str) -> Result<Self, VocabError> {
        let a = lang_a.trim().to_lowercase();
        let b = lang_b.trim().to_lowercase();

        if a.is_empty() || b.is_empty() || a.contains(':') || b.contains(':') {
            return Err(VocabError::InvalidPair(format!("{lang_a}:{lang_b}")));
        }

        let (primary, secondary) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self { primary, secondary })
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    /// Slot holding words of `lang`, or `None` if `lang` is not in the pair.
    pub fn slot_of(&self, lang: &str) -> Option<Slot> {
        let lang = lang.trim().to_lowercase();
        if lang == self.primary {
            Some(Slot::Primary)
        } else if lang == self.secondary {
            Some(Slot::Secondary)
        } else {
            None
        }
    }

    /// Like [`slot_of`](Self::slot_of) but treats a foreign language as a
    /// caller bug.
    pub fn require_slot(&self, lang: &str) -> Result<Slot, VocabError> {
        self.slot_of(lang)
            .ok_or_else(|| VocabError::LanguageNotInPair {
                lang: lang.to_string(),
                pair: self.to_string(),
            })
    }

    pub fn lang_of(&self, slot: Slot) -> &str {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }
}

impl fmt::Display for LanguagePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.primary, self.secondary)
    }
}

impl FromStr for LanguagePairKey {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| VocabError::InvalidPair(s.to_string()))?;
        Self::new(a, b)
    }
}

impl TryFrom<String> for LanguagePairKey {
    type Error = VocabError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguagePairKey> for String {
    fn from(key: LanguagePairKey) -> Self {
        key.to_string()
    }
}

/// A bilingual entry, stored as `(primary word, secondary word)`.
///
/// Which word lands in which slot depends only on the alphabetical order of
/// the two language codes, never on the direction of the exercise it was
/// learned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyPair(pub String, pub String);

impl VocabularyPair {
    /// Build a pair from a word in `source_lang` and its translation in
    /// `target_lang`, placing each word in its alphabetical slot.
    pub fn oriented(
        source_word: &str,
        source_lang: &str,
        target_word: &str,
        target_lang: &str,
    ) -> Self {
        if source_lang.to_lowercase() <= target_lang.to_lowercase() {
            Self(source_word.to_string(), target_word.to_string())
        } else {
            Self(target_word.to_string(), source_word.to_string())
        }
    }

    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Primary => &self.0,
            Slot::Secondary => &self.1,
        }
    }

    pub fn is_tombstone(&self, slot: Slot) -> bool {
        self.get(slot) == TOMBSTONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_sorted_and_lowercased() {
        let key = LanguagePairKey::new("ES", "en").unwrap();
        assert_eq!(key.to_string(), "en:es");
        assert_eq!(key.primary(), "en");
        assert_eq!(key.secondary(), "es");
        assert_eq!(key, LanguagePairKey::new("en", "es").unwrap());
    }

    #[test]
    fn test_pair_key_parse() {
        let key: LanguagePairKey = "es:en".parse().unwrap();
        assert_eq!(key.to_string(), "en:es");
        assert!("enes".parse::<LanguagePairKey>().is_err());
        assert!(":es".parse::<LanguagePairKey>().is_err());
    }

    #[test]
    fn test_slot_of() {
        let key = LanguagePairKey::new("de", "en").unwrap();
        assert_eq!(key.slot_of("de"), Some(Slot::Primary));
        assert_eq!(key.slot_of("EN"), Some(Slot::Secondary));
        assert_eq!(key.slot_of("fr"), None);
        assert!(key.require_slot("fr").is_err());
        assert_eq!(key.lang_of(Slot::Secondary), "en");
    }

    #[test]
    fn test_oriented_pair() {
        assert_eq!(
            VocabularyPair::oriented("hund", "de", "dog", "en"),
            VocabularyPair("hund".into(), "dog".into())
        );
        assert_eq!(
            VocabularyPair::oriented("dog", "en", "hund", "de"),
            VocabularyPair("hund".into(), "dog".into())
        );
    }

    #[test]
    fn test_key_string_conversions() {
        let key = LanguagePairKey::new("fr", "en").unwrap();
        assert_eq!(String::from(key.clone()), "en:fr");
        assert_eq!(LanguagePairKey::try_from("fr:en".to_string()).unwrap(), key);
    }
}
