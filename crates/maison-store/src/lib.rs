//! # Maison Store
//!
//! Shopper state for the Maison storefront.
//!
//! Collections that mirror the backend (cart, wishlist) are [`SyncedList`]s:
//! the last server snapshot plus a queue of optimistic edits. Every change is
//! persisted to a [`maison_cache::Cache`] slot keyed by the shopper session,
//! so a reload shows the same cart before the backend answers.
//!
//! The store itself never performs I/O beyond the cache. Callers push an
//! edit, send the request, then settle the edit:
//!
//! ```ignore
//! let (op, body) = store.cart.add(line)?;
//! match maison_services::cart::add_line(&client, &body).await {
//!     Ok(cart) => store.cart.apply_server(cart, Some(op))?,
//!     Err(_) => store.cart.rollback(op)?,
//! }
//! ```

pub mod app;
pub mod auth;
pub mod buy_now;
pub mod cart;
pub mod error;
pub mod persist;
pub mod synced;
pub mod wishlist;

pub use app::AppStore;
pub use error::StoreError;
pub use synced::{Keyed, ListOp, OpId, SyncedList};

/// Prelude for common imports
pub mod prelude {
    pub use crate::app::AppStore;
    pub use crate::auth::AuthState;
    pub use crate::buy_now::BuyNowStore;
    pub use crate::cart::CartStore;
    pub use crate::error::StoreError;
    pub use crate::synced::{OpId, SyncedList};
    pub use crate::wishlist::{Toggle, WishlistStore};
}
