// All repositories are generic over `S: BlobStore` so the same code runs
// against the in-memory backend in tests and the file backend in production.
// Every value goes through `codec::compress` before reaching the backend.

pub mod lessons;
pub mod progress;
pub mod vocabulary;

use serde::{Serialize, de::DeserializeOwned};
use wb_lesson::codec;

use crate::{backend::BlobStore, error::StoreError};

pub(crate) async fn read_json<S, T>(storage: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(blob) = storage.get_blob(key).await? else {
        return Ok(None);
    };
    if blob.is_empty() {
        return Ok(None);
    }
    let json = codec::decompress(&blob)?;
    Ok(Some(serde_json::from_str(&json)?))
}

pub(crate) async fn write_json<S, T>(storage: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: BlobStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_blob(key, codec::compress(&json)?).await
}
