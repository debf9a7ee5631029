use uuid::Uuid;
use wb_lesson::LessonProgress;

use super::{read_json, write_json};
use crate::{backend::BlobStore, error::StoreError};

fn blob_key(lesson_id: Uuid) -> String {
    format!("progress:{lesson_id}")
}

/// Review progress and mistakes, stored per lesson id.
#[derive(Debug, Clone)]
pub struct ProgressRepository<S> {
    storage: S,
}

impl<S: BlobStore> ProgressRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored progress for `lesson_id`, or fresh progress if none was saved.
    pub async fn load(&self, lesson_id: Uuid) -> Result<LessonProgress, StoreError> {
        Ok(read_json(&self.storage, &blob_key(lesson_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn save(&self, lesson_id: Uuid, progress: &LessonProgress) -> Result<(), StoreError> {
        write_json(&self.storage, &blob_key(lesson_id), progress).await?;
        tracing::debug!(
            "Saved progress for lesson {} ({} exercise(s), {} mistake(s))",
            lesson_id,
            progress.exercises.len(),
            progress.mistakes.len()
        );
        Ok(())
    }

    pub async fn clear(&self, lesson_id: Uuid) -> Result<bool, StoreError> {
        self.storage.remove_blob(&blob_key(lesson_id)).await
    }
}
