//! One persisted value per shopper session.

use crate::StoreError;
use maison_cache::{cache_key, Cache, SessionId};
use serde::{de::DeserializeOwned, Serialize};

/// A cache entry under `maison:<session>:<name>`.
#[derive(Debug, Clone)]
pub struct Slot {
    cache: Cache,
    key: String,
}

impl Slot {
    pub fn new(cache: Cache, session: &SessionId, name: &str) -> Self {
        Self {
            key: cache_key!("maison", session, name),
            cache,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value. A value that no longer decodes is dropped and treated
    /// as absent, so a schema change never locks a shopper out.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        match self.cache.get(&self.key) {
            Ok(value) => Ok(value),
            Err(maison_cache::CacheError::Codec(e)) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable persisted state");
                self.cache.delete(&self.key)?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        self.cache.set(&self.key, value)?;
        tracing::trace!(key = %self.key, "state persisted");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.cache.delete(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use maison_cache::{CacheError, KvBackend};
    use std::sync::Arc;

    /// Storage that reads as empty and refuses every write.
    struct ReadOnlyBackend;

    impl KvBackend for ReadOnlyBackend {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::Backend("storage is full".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::Backend("storage is read-only".to_string()))
        }

        fn exists(&self, _key: &str) -> Result<bool, CacheError> {
            Ok(false)
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    pub(crate) fn read_only_cache() -> Cache {
        Cache::with_backend(Arc::new(ReadOnlyBackend))
    }

    #[test]
    fn test_slot_roundtrip_and_key() {
        let cache = Cache::in_memory();
        let slot = Slot::new(cache.clone(), &SessionId::new("sess_1"), "cart");
        assert_eq!(slot.key(), "maison:sess_1:cart");

        slot.save(&vec![1, 2, 3]).unwrap();
        assert_eq!(slot.load::<Vec<u8>>().unwrap(), Some(vec![1, 2, 3]));
        slot.clear().unwrap();
        assert_eq!(slot.load::<Vec<u8>>().unwrap(), None);
    }

    #[test]
    fn test_unreadable_state_is_discarded() {
        let cache = Cache::in_memory();
        let slot = Slot::new(cache.clone(), &SessionId::new("sess_1"), "cart");
        cache.set(slot.key(), &"not a list").unwrap();

        assert_eq!(slot.load::<Vec<u8>>().unwrap(), None);
        assert!(!cache.exists(slot.key()).unwrap());
    }
}
