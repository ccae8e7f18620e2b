//! The application-wide store handed to every page.

use crate::auth::AuthState;
use crate::buy_now::BuyNowStore;
use crate::cart::CartStore;
use crate::persist::Slot;
use crate::wishlist::WishlistStore;
use crate::StoreError;
use maison_cache::{Cache, SessionId};
use maison_commerce::user::User;

const CART_SLOT: &str = "cart";
const WISHLIST_SLOT: &str = "wishlist";
const BUY_NOW_SLOT: &str = "buy-now";

/// Where the shopper's session id lives, outside any session namespace.
pub const SESSION_KEY: &str = "maison:session";

/// Auth, cart, wishlist and buy-now state for one shopper session.
///
/// Built once per application instance and provided through context;
/// tests build one over [`Cache::in_memory`].
#[derive(Debug, Clone)]
pub struct AppStore {
    session: SessionId,
    pub auth: AuthState,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub buy_now: BuyNowStore,
}

impl AppStore {
    /// Empty state for `session`, ignoring anything persisted.
    pub fn new(cache: Cache, session: SessionId) -> Self {
        let slot = |name: &str| Slot::new(cache.clone(), &session, name);
        Self {
            auth: AuthState::new(),
            cart: CartStore::new(slot(CART_SLOT)),
            wishlist: WishlistStore::new(slot(WISHLIST_SLOT)),
            buy_now: BuyNowStore::new(slot(BUY_NOW_SLOT)),
            session,
        }
    }

    /// Restore every persisted slot for `session`.
    pub fn hydrate(cache: Cache, session: SessionId) -> Result<Self, StoreError> {
        let slot = |name: &str| Slot::new(cache.clone(), &session, name);
        let store = Self {
            auth: AuthState::new(),
            cart: CartStore::hydrate(slot(CART_SLOT))?,
            wishlist: WishlistStore::hydrate(slot(WISHLIST_SLOT))?,
            buy_now: BuyNowStore::hydrate(slot(BUY_NOW_SLOT))?,
            session,
        };
        tracing::info!(session = %store.session, items = store.cart.item_count(), "store hydrated");
        Ok(store)
    }

    /// Pick up where the shopper left off: reuse the session id stored in
    /// `cache`, or start and store a new one, then hydrate it.
    pub fn resume(cache: Cache) -> Result<Self, StoreError> {
        let session = match cache.get::<SessionId>(SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => Self::start_session(&cache)?,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable session id, starting a new session");
                Self::start_session(&cache)?
            }
        };
        Self::hydrate(cache, session)
    }

    fn start_session(cache: &Cache) -> Result<SessionId, StoreError> {
        let session = SessionId::generate();
        cache.set(SESSION_KEY, &session)?;
        tracing::debug!(%session, "new shopper session");
        Ok(session)
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn login(&mut self, user: User) {
        tracing::info!(user_id = %user.id, "signed in");
        self.auth.set_user(Some(user));
    }

    /// Sign out and forget everything tied to the shopper.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.auth.clear();
        self.cart.reset()?;
        self.wishlist.reset()?;
        self.buy_now.clear()?;
        tracing::info!(session = %self.session, "signed out, shopper state cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maison_commerce::cart::CartLine;
    use maison_commerce::ids::{LineItemId, ProductId, UserId};
    use maison_commerce::user::Role;
    use maison_commerce::{Currency, Money};

    fn line() -> CartLine {
        CartLine {
            id: LineItemId::new("l1"),
            product_id: ProductId::new("p1"),
            handle: "p1".to_string(),
            title: "Saree".to_string(),
            image: None,
            size: None,
            color: Some("Red".to_string()),
            quantity: 1,
            unit_price: Money::new(9_900, Currency::INR),
        }
    }

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            email: "asha@maison.in".to_string(),
            name: "Asha".to_string(),
            phone: None,
            role: Role::Customer,
            created_at: None,
        }
    }

    #[test]
    fn test_hydrate_restores_session_state() {
        let cache = Cache::in_memory();
        let session = SessionId::new("sess_app");
        let mut store = AppStore::hydrate(cache.clone(), session.clone()).unwrap();
        store.cart.add(line()).unwrap();
        store.buy_now.set(line()).unwrap();

        let again = AppStore::hydrate(cache.clone(), session).unwrap();
        assert_eq!(again.cart.item_count(), 1);
        assert!(again.buy_now.get().is_some());

        let other = AppStore::hydrate(cache, SessionId::new("sess_other")).unwrap();
        assert_eq!(other.cart.item_count(), 0);
    }

    #[test]
    fn test_resume_reuses_stored_session() {
        let cache = Cache::in_memory();
        let mut first = AppStore::resume(cache.clone()).unwrap();
        first.cart.add(line()).unwrap();

        // A reload builds a fresh store over the same storage.
        let second = AppStore::resume(cache.clone()).unwrap();
        assert_eq!(second.session(), first.session());
        assert_eq!(second.cart.item_count(), 1);
        assert_eq!(cache.get::<SessionId>(SESSION_KEY).unwrap().as_ref(), Some(first.session()));

        let elsewhere = AppStore::resume(Cache::in_memory()).unwrap();
        assert_ne!(elsewhere.session(), first.session());
        assert_eq!(elsewhere.cart.item_count(), 0);
    }

    #[test]
    fn test_resume_replaces_unreadable_session() {
        let cache = Cache::in_memory();
        cache.set(SESSION_KEY, &42).unwrap();
        let store = AppStore::resume(cache.clone()).unwrap();
        assert_eq!(cache.get::<SessionId>(SESSION_KEY).unwrap().as_ref(), Some(store.session()));
    }

    #[test]
    fn test_logout_clears_state_and_storage() {
        let cache = Cache::in_memory();
        let session = SessionId::new("sess_app");
        let mut store = AppStore::hydrate(cache.clone(), session.clone()).unwrap();
        store.login(user());
        store.cart.add(line()).unwrap();
        store.buy_now.set(line()).unwrap();
        assert!(store.auth.is_authenticated());

        store.logout().unwrap();
        assert!(!store.auth.is_authenticated());
        assert!(store.cart.cart().is_empty());
        assert!(store.wishlist.is_empty());
        assert!(store.buy_now.get().is_none());
        assert!(cache.keys().unwrap().is_empty());
    }
}
