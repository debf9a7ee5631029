//! Wordbank learning sessions
//!
//! Ties a lesson, the vocabulary of its language pair and the learner's
//! progress together, plus environment configuration and logging setup.

pub mod config;
pub mod error;
pub mod session;
pub mod tracing;

pub use config::{Environment, SessionConfig};
pub use error::SessionError;
pub use session::Session;
