use thiserror::Error;

use crate::codec::CodecError;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("Malformed lesson: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid lesson: {0}")]
    Validation(String),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("URL has no '{0}' parameter")]
    MissingParameter(&'static str),
}

impl From<validator::ValidationErrors> for LessonError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LessonError::Validation(errors.to_string())
    }
}
