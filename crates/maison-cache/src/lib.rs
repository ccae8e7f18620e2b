//! Persisted key-value storage for Maison shopper state.
//!
//! Cart, wishlist and buy-now snapshots survive reloads by living in a
//! key-value store, namespaced by the shopper's session id. In the
//! browser that is `localStorage`, inside Spin the component's
//! Key-Value Store, and elsewhere an in-memory map.
//!
//! ```rust,ignore
//! use maison_cache::{cache_key, Cache, SessionId};
//!
//! let cache = Cache::open_default()?;
//! let session = SessionId::generate();
//! let key = cache_key!("maison", session, "cart");
//!
//! cache.set(&key, &snapshot)?;
//! let restored: Option<CartSnapshot> = cache.get(&key)?;
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, KvBackend, MemoryBackend};
pub use session::{SessionId, SESSION_COOKIE};

#[cfg(all(target_arch = "wasm32", feature = "spin"))]
pub use kv::SpinBackend;

#[cfg(all(target_arch = "wasm32", feature = "browser"))]
pub use kv::BrowserBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, Cache, CacheError, SessionId};
}
