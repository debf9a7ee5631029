use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use super::BlobStore;
use crate::error::StoreError;

const EXTENSION: &str = "blob";

/// A file-system [`BlobStore`]. Every blob is a file inside `root_dir`,
/// named after its (base64-encoded) key.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root_dir: PathBuf,
}

impl FileBlobStore {
    /// Creates a new [`FileBlobStore`] storing files in `root_dir`, creating
    /// the directory if needed.
    pub async fn new(root_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root_dir = root_dir.as_ref().to_owned();
        tokio::fs::create_dir_all(&root_dir).await?;
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn make_path(&self, key: &str) -> PathBuf {
        self.root_dir
            .join(format!("{}.{EXTENSION}", URL_SAFE_NO_PAD.encode(key)))
    }

    fn key_from_path(path: &Path) -> Option<String> {
        if path.extension()? != EXTENSION {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let bytes = URL_SAFE_NO_PAD.decode(stem).ok()?;
        String::from_utf8(bytes).ok()
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.make_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn set_blob(&self, key: &str, value: String) -> Result<(), StoreError> {
        tokio::fs::write(self.make_path(key), value).await?;
        Ok(())
    }

    async fn remove_blob(&self, key: &str) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(self.make_path(key)).await {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root_dir).await?;
        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(key) = Self::key_from_path(&entry.path()) {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            } else {
                tracing::debug!("Ignoring foreign file {}", entry.path().display());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
