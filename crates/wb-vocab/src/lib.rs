//! Vocabulary cross-referencing for Wordbank.
//!
//! This crate holds the pure text algorithms: tokenization, the per language
//! pair vocabulary, translation matching and the extraction of the words of a
//! prompt that a learner may need help with. Nothing here performs I/O.

pub mod error;
pub mod extractor;
pub mod matcher;
pub mod pair;
pub mod tokenizer;
pub mod vocabulary;

pub use error::VocabError;
pub use extractor::{VocabularyEntry, extract, extract_entries};
pub use matcher::TranslationMatcher;
pub use pair::{LanguagePairKey, Slot, TOMBSTONE, VocabularyPair};
pub use vocabulary::Vocabulary;
