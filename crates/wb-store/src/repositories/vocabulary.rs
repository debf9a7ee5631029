use wb_vocab::{LanguagePairKey, TranslationMatcher, Vocabulary, VocabularyPair};

use super::{read_json, write_json};
use crate::{backend::BlobStore, error::StoreError};

fn blob_key(key: &LanguagePairKey) -> String {
    format!("vocabulary:{key}")
}

/// The persisted vocabulary of one language pair.
///
/// Starts unbound; [`VocabularyStore::load`] binds it to a pair. Mutations
/// only touch memory until [`VocabularyStore::save`] is called.
#[derive(Debug)]
pub struct VocabularyStore<S> {
    storage: S,
    current: Option<Vocabulary>,
}

impl<S: BlobStore> VocabularyStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    pub fn key(&self) -> Option<&LanguagePairKey> {
        self.current.as_ref().map(Vocabulary::key)
    }

    /// Replace the in-memory vocabulary with the one stored for `key`.
    ///
    /// A missing blob gives an empty vocabulary. An unreadable blob also
    /// leaves an empty vocabulary bound to `key`, and the error is returned.
    pub async fn load(&mut self, key: LanguagePairKey) -> Result<usize, StoreError> {
        let loaded = read_json::<_, Vec<VocabularyPair>>(&self.storage, &blob_key(&key)).await;
        match loaded {
            Ok(pairs) => {
                let pairs = pairs.unwrap_or_default();
                let count = pairs.len();
                tracing::info!("Loaded {} vocabulary pair(s) for {}", count, key);
                self.current = Some(Vocabulary::with_pairs(key, pairs));
                Ok(count)
            }
            Err(error) => {
                tracing::warn!("Failed to load vocabulary for {}: {}", key, error);
                self.current = Some(Vocabulary::new(key));
                Err(error)
            }
        }
    }

    /// Load `key` unless it is already the bound pair.
    pub async fn ensure_loaded(&mut self, key: &LanguagePairKey) -> Result<(), StoreError> {
        if self.key() == Some(key) {
            return Ok(());
        }
        self.load(key.clone()).await.map(|_| ())
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        let vocabulary = self.vocabulary()?;
        write_json(&self.storage, &blob_key(vocabulary.key()), vocabulary.pairs()).await?;
        tracing::info!(
            "Saved {} vocabulary pair(s) for {}",
            vocabulary.len(),
            vocabulary.key()
        );
        Ok(())
    }

    pub fn vocabulary(&self) -> Result<&Vocabulary, StoreError> {
        self.current.as_ref().ok_or(StoreError::NotConfigured)
    }

    fn vocabulary_mut(&mut self) -> Result<&mut Vocabulary, StoreError> {
        self.current.as_mut().ok_or(StoreError::NotConfigured)
    }

    pub fn matcher(&self) -> Result<TranslationMatcher<'_>, StoreError> {
        Ok(self.vocabulary()?.matcher())
    }

    pub fn add_pair(
        &mut self,
        source_word: &str,
        source_lang: &str,
        target_word: &str,
        target_lang: &str,
    ) -> Result<(), StoreError> {
        self.vocabulary_mut()?
            .add_pair(source_word, source_lang, target_word, target_lang)?;
        Ok(())
    }

    pub fn remove_pairs_for_source_word(
        &mut self,
        source_word: &str,
        source_lang: &str,
    ) -> Result<usize, StoreError> {
        Ok(self
            .vocabulary_mut()?
            .remove_pairs_for_source_word(source_word, source_lang)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wb_vocab::TOMBSTONE;

    use super::*;
    use crate::backend::MemoryBlobStore;

    fn en_es() -> LanguagePairKey {
        LanguagePairKey::new("es", "en").unwrap()
    }

    #[tokio::test]
    async fn test_unbound_store_is_not_configured() {
        let mut store = VocabularyStore::new(MemoryBlobStore::new());
        assert!(matches!(store.vocabulary(), Err(StoreError::NotConfigured)));
        let error = store.add_pair("cat", "en", "gato", "es").unwrap_err();
        assert!(error.is_contract_violation());
        assert!(matches!(store.save().await, Err(StoreError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_missing_blob_loads_empty() {
        let mut store = VocabularyStore::new(MemoryBlobStore::new());
        assert_eq!(store.load(en_es()).await.unwrap(), 0);
        assert!(store.vocabulary().unwrap().is_empty());
        assert_eq!(store.key(), Some(&en_es()));
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let storage = MemoryBlobStore::new();
        let mut store = VocabularyStore::new(storage.clone());
        store.load(en_es()).await.unwrap();
        store.add_pair("cat", "en", "gato", "es").unwrap();
        store.add_pair("the weather", "en", TOMBSTONE, "es").unwrap();
        store.save().await.unwrap();

        let mut reopened = VocabularyStore::new(storage.clone());
        assert_eq!(reopened.load(en_es()).await.unwrap(), 2);
        let matcher = reopened.matcher().unwrap();
        assert_eq!(matcher.lookup_exact("cat", "en"), "gato");
        assert_eq!(matcher.lookup_exact("gato", "es"), "cat");
        assert_eq!(matcher.lookup_exact("the weather", "en"), TOMBSTONE);

        assert!(storage.get_blob("vocabulary:en:es").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mutations_are_not_persisted_until_save() {
        let storage = MemoryBlobStore::new();
        let mut store = VocabularyStore::new(storage.clone());
        store.load(en_es()).await.unwrap();
        store.add_pair("dog", "en", "perro", "es").unwrap();

        let mut other = VocabularyStore::new(storage);
        assert_eq!(other.load(en_es()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_blob_yields_empty_vocabulary_and_error() {
        let storage = MemoryBlobStore::new();
        storage
            .set_blob("vocabulary:en:es", "%%not base64%%".into())
            .await
            .unwrap();

        let mut store = VocabularyStore::new(storage);
        let result = store.load(en_es()).await;
        assert!(matches!(result, Err(StoreError::Codec(_))));
        assert!(!result.unwrap_err().is_contract_violation());

        let vocabulary = store.vocabulary().unwrap();
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.key(), &en_es());
    }

    #[tokio::test]
    async fn test_ensure_loaded_keeps_unsaved_changes_for_same_key() {
        let mut store = VocabularyStore::new(MemoryBlobStore::new());
        store.ensure_loaded(&en_es()).await.unwrap();
        store.add_pair("cat", "en", "gato", "es").unwrap();

        store.ensure_loaded(&en_es()).await.unwrap();
        assert_eq!(store.vocabulary().unwrap().len(), 1);

        let de_en = LanguagePairKey::new("de", "en").unwrap();
        store.ensure_loaded(&de_en).await.unwrap();
        assert_eq!(store.key(), Some(&de_en));
        assert!(store.vocabulary().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_pairs_then_save() {
        let storage = MemoryBlobStore::new();
        let mut store = VocabularyStore::new(storage.clone());
        store.load(en_es()).await.unwrap();
        store.add_pair("cat", "en", "gato", "es").unwrap();
        store.add_pair("Cat", "en", "felino", "es").unwrap();
        store.add_pair("dog", "en", "perro", "es").unwrap();

        assert_eq!(store.remove_pairs_for_source_word("CAT", "en").unwrap(), 2);
        store.save().await.unwrap();

        let mut reopened = VocabularyStore::new(storage);
        reopened.load(en_es()).await.unwrap();
        assert_eq!(
            reopened.vocabulary().unwrap().pairs(),
            &[VocabularyPair("dog".into(), "perro".into())]
        );
    }
}
