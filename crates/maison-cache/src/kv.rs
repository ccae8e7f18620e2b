//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Raw byte storage underneath a [`Cache`].
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
    fn delete(&self, key: &str) -> Result<(), CacheError>;
    fn exists(&self, key: &str) -> Result<bool, CacheError>;
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Spin's Key-Value Store, opened by label on each call. Spin store
/// handles are not `Send`, so only the label is kept.
#[cfg(all(target_arch = "wasm32", feature = "spin"))]
#[derive(Debug, Clone)]
pub struct SpinBackend {
    name: String,
}

#[cfg(all(target_arch = "wasm32", feature = "spin"))]
impl SpinBackend {
    pub fn open_default() -> Result<Self, CacheError> {
        Self::open("default")
    }

    /// Open the store labelled `name`, failing early if Spin does not
    /// grant the component access to it.
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let backend = Self {
            name: name.to_string(),
        };
        backend.store()?;
        Ok(backend)
    }

    fn store(&self) -> Result<spin_sdk::key_value::Store, CacheError> {
        spin_sdk::key_value::Store::open(&self.name).map_err(|e| CacheError::Open {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(all(target_arch = "wasm32", feature = "spin"))]
impl KvBackend for SpinBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store()?
            .get(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.store()?
            .set(key, value)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store()?
            .delete(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store()?
            .exists(key)
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store()?
            .get_keys()
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

/// The browser's `localStorage`. Values are JSON, so they are kept as
/// UTF-8 strings.
#[cfg(all(target_arch = "wasm32", feature = "browser"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserBackend;

#[cfg(all(target_arch = "wasm32", feature = "browser"))]
fn js_error(e: impl std::fmt::Debug) -> CacheError {
    CacheError::Backend(format!("localStorage: {e:?}"))
}

#[cfg(all(target_arch = "wasm32", feature = "browser"))]
impl KvBackend for BrowserBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        use gloo::storage::{LocalStorage, Storage};
        Ok(LocalStorage::raw()
            .get_item(key)
            .map_err(js_error)?
            .map(String::into_bytes))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        use gloo::storage::{LocalStorage, Storage};
        let value = std::str::from_utf8(value)
            .map_err(|e| CacheError::Backend(format!("localStorage holds text only: {e}")))?;
        LocalStorage::raw().set_item(key, value).map_err(js_error)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::raw().remove_item(key).map_err(js_error)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        use gloo::storage::{LocalStorage, Storage};
        let storage = LocalStorage::raw();
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = storage.key(i).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> CacheError {
        CacheError::Backend("memory store lock poisoned".to_string())
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cheap to clone.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an explicit backend.
    pub fn with_backend(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// A cache backed by a fresh in-memory map.
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Open the default Key-Value store.
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_default()?;
    /// ```
    #[cfg(all(target_arch = "wasm32", feature = "spin"))]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::with_backend(Arc::new(SpinBackend::open_default()?)))
    }

    /// Open a named Key-Value store.
    #[cfg(all(target_arch = "wasm32", feature = "spin"))]
    pub fn open(name: &str) -> Result<Self, CacheError> {
        Ok(Self::with_backend(Arc::new(SpinBackend::open(name)?)))
    }

    /// Open the default store. Native builds get an in-memory store.
    #[cfg(not(all(target_arch = "wasm32", feature = "spin")))]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::in_memory())
    }

    /// Open a named store. Native builds get an in-memory store.
    #[cfg(not(all(target_arch = "wasm32", feature = "spin")))]
    pub fn open(_name: &str) -> Result<Self, CacheError> {
        Ok(Self::in_memory())
    }

    /// The shopper's own persistent store: `localStorage` in the
    /// browser, an in-memory map anywhere else.
    #[cfg(all(target_arch = "wasm32", feature = "browser"))]
    pub fn browser() -> Self {
        Self::with_backend(Arc::new(BrowserBackend))
    }

    /// The shopper's own persistent store. Without `localStorage` this
    /// is an in-memory map.
    #[cfg(not(all(target_arch = "wasm32", feature = "browser")))]
    pub fn browser() -> Self {
        Self::in_memory()
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// ```rust,ignore
    /// let cart: Option<CartSnapshot> = cache.get("maison:sess_abc:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        tracing::trace!(key, bytes = bytes.len(), "cache set");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        tracing::trace!(key, "cache delete");
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }

    /// Delete every key starting with `prefix`. Returns how many were removed.
    pub fn delete_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let keys: Vec<String> = self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        for key in &keys {
            self.delete(key)?;
        }
        Ok(keys.len())
    }
}

/// Helper to build cache keys with namespacing.
///
/// ```rust,ignore
/// let key = cache_key!("maison", session_id, "cart");
/// // "maison:sess_abc:cart"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Snapshot {
        items: Vec<String>,
    }

    #[test]
    fn test_set_get_roundtrip() {
        let cache = Cache::in_memory();
        let snapshot = Snapshot {
            items: vec!["linen-shirt".to_string()],
        };
        cache.set("cart", &snapshot).unwrap();
        assert_eq!(cache.get::<Snapshot>("cart").unwrap(), Some(snapshot));
        assert!(cache.exists("cart").unwrap());
    }

    #[test]
    fn test_get_missing() {
        let cache = Cache::in_memory();
        assert_eq!(cache.get::<Snapshot>("nope").unwrap(), None);
    }

    #[test]
    fn test_get_wrong_shape_is_error() {
        let cache = Cache::in_memory();
        cache.set("cart", &42).unwrap();
        assert!(matches!(
            cache.get::<Snapshot>("cart"),
            Err(CacheError::Codec(_))
        ));
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("k", &"v").unwrap();
        assert_eq!(other.get::<String>("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_delete_prefix() {
        let cache = Cache::in_memory();
        cache.set("maison:a:cart", &1).unwrap();
        cache.set("maison:a:wishlist", &2).unwrap();
        cache.set("maison:b:cart", &3).unwrap();

        assert_eq!(cache.delete_prefix("maison:a:").unwrap(), 2);
        assert_eq!(cache.keys().unwrap(), vec!["maison:b:cart".to_string()]);
    }

    #[test]
    fn test_cache_key_macro() {
        let key = crate::cache_key!("maison", "sess_1", "cart");
        assert_eq!(key, "maison:sess_1:cart");
    }
}
