//! Persistence layer for Wordbank
//!
//! Everything is stored as compressed JSON blobs through the [`BlobStore`]
//! trait, with an in-memory and a file-system backend.

pub mod backend;
pub mod error;
pub mod repositories;

pub use backend::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::StoreError;
pub use repositories::{
    lessons::{LessonLibrary, LessonRecord},
    progress::ProgressRepository,
    vocabulary::VocabularyStore,
};
