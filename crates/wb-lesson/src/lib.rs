//! Lesson domain for Wordbank
//!
//! This crate provides lesson loading and validation, the direction cycle
//! that decides which language is prompted, word bank assembly, answer
//! feedback, progress scheduling and lesson sharing.

pub mod assembler;
pub mod codec;
pub mod direction;
pub mod error;
pub mod feedback;
pub mod lesson;
pub mod progress;
pub mod share;
pub mod validation;

pub use assembler::{DEFAULT_NOISE_WORDS, ExerciseAssembler, ExercisePayload};
pub use direction::{CyclePhase, DirectionCycle, ExerciseDirection};
pub use error::LessonError;
pub use feedback::{AnswerFeedback, FeedbackToken, TokenKind, check_answer};
pub use lesson::{Exercise, LessonConfig, Side};
pub use progress::{ExerciseProgress, LessonProgress, Mistake};
