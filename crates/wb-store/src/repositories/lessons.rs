use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wb_lesson::LessonConfig;

use super::{read_json, write_json};
use crate::{backend::BlobStore, error::StoreError};

const PREFIX: &str = "lesson:";

fn blob_key(id: Uuid) -> String {
    format!("{PREFIX}{id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: Uuid,
    pub title: String,
    pub saved_at: DateTime<Utc>,
    pub lesson: LessonConfig,
}

/// Saved lessons, one blob per lesson id.
#[derive(Debug, Clone)]
pub struct LessonLibrary<S> {
    storage: S,
}

impl<S: BlobStore> LessonLibrary<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Validate and store `lesson` under a fresh id.
    pub async fn save(&self, lesson: LessonConfig) -> Result<LessonRecord, StoreError> {
        self.put(Uuid::new_v4(), lesson).await
    }

    /// Replace the lesson stored under `id`.
    pub async fn update(&self, id: Uuid, lesson: LessonConfig) -> Result<LessonRecord, StoreError> {
        if self.storage.get_blob(&blob_key(id)).await?.is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.put(id, lesson).await
    }

    async fn put(&self, id: Uuid, lesson: LessonConfig) -> Result<LessonRecord, StoreError> {
        let lesson = lesson.validated()?;
        let record = LessonRecord {
            id,
            title: lesson.title.clone(),
            saved_at: Utc::now(),
            lesson,
        };
        write_json(&self.storage, &blob_key(id), &record).await?;
        tracing::info!("Saved lesson '{}' ({})", record.title, id);
        Ok(record)
    }

    pub async fn load(&self, id: Uuid) -> Result<LessonRecord, StoreError> {
        read_json(&self.storage, &blob_key(id))
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Every saved lesson, sorted by title. Unreadable records are skipped.
    pub async fn list(&self) -> Result<Vec<LessonRecord>, StoreError> {
        let mut records = Vec::new();
        for key in self.storage.keys(PREFIX).await? {
            match read_json::<_, LessonRecord>(&self.storage, &key).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(error) => tracing::warn!("Skipping unreadable lesson {}: {}", key, error),
            }
        }
        records.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(records)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if !self.storage.remove_blob(&blob_key(id)).await? {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!("Deleted lesson {}", id);
        Ok(())
    }
}
