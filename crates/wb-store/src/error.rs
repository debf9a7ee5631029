use thiserror::Error;
use uuid::Uuid;
use wb_lesson::{LessonError, codec::CodecError};
use wb_vocab::VocabError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid stored lesson: {0}")]
    Lesson(#[from] LessonError),
    #[error("No lesson with id {0}")]
    NotFound(Uuid),
    /// The vocabulary was used before a language pair was loaded.
    #[error("Vocabulary store used before a language pair was loaded")]
    NotConfigured,
    #[error(transparent)]
    Vocab(#[from] VocabError),
}

impl StoreError {
    /// Caller bugs, as opposed to data or I/O problems.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, StoreError::NotConfigured | StoreError::Vocab(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::Backend(error.to_string())
    }
}
