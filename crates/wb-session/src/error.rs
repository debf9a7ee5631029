use thiserror::Error;
use wb_lesson::LessonError;
use wb_store::StoreError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No lesson has been started")]
    NoLesson,
    #[error("Lesson has no exercises")]
    NoExercises,
    #[error("Exercise {index} is out of range (lesson has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Lesson must be saved before its progress can be stored")]
    UnsavedLesson,
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
