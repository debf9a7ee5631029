use thiserror::Error;

/// Contract violations raised by the vocabulary types.
///
/// Data-shape problems never end up here: lookups and extraction degrade to
/// empty results instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabError {
    #[error("Invalid language pair: {0}")]
    InvalidPair(String),
    #[error("Language '{lang}' is not part of the pair '{pair}'")]
    LanguageNotInPair { lang: String, pair: String },
}
