//! Shopper state in context, and the optimistic edit flow pages share:
//! push the edit, call the server function, then settle or roll back.

use crate::api;
use leptos::prelude::*;
use leptos::server_fn::error::ServerFnError;
use leptos::task::spawn_local;
use maison_cache::{Cache, SessionId};
use maison_commerce::prelude::*;
use maison_store::wishlist::Toggle;
use maison_store::{AppStore, StoreError};
use maison_ui::{use_toasts, Toasts};

/// Put the shopper's store in context. The first render, on the server
/// and during hydration, uses an empty store; once mounted in the browser
/// the store resumes from `localStorage`.
pub fn provide_store() -> RwSignal<AppStore> {
    let store = RwSignal::new(AppStore::new(Cache::in_memory(), SessionId::generate()));
    provide_context(store);
    Effect::new(move |_| resume_into(store));
    store
}

fn resume_into(store: RwSignal<AppStore>) {
    match AppStore::resume(Cache::browser()) {
        Ok(mut resumed) => store.update(|current| {
            // Keep whatever sign-in state arrived first.
            resumed.auth = std::mem::take(&mut current.auth);
            *current = resumed;
        }),
        Err(e) => tracing::warn!(error = %e, "shopper state not restored, keeping an empty store"),
    }
}

pub fn use_store() -> RwSignal<AppStore> {
    use_context::<RwSignal<AppStore>>()
        .unwrap_or_else(|| RwSignal::new(AppStore::new(Cache::in_memory(), SessionId::generate())))
}

/// The message a shopper should see for a failed server call.
pub fn error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Store and toasts captured at component setup, so event handlers can
/// use them without a reactive owner.
#[derive(Clone, Copy)]
pub struct Shop {
    pub store: RwSignal<AppStore>,
    pub toasts: Toasts,
}

pub fn use_shop() -> Shop {
    Shop {
        store: use_store(),
        toasts: use_toasts(),
    }
}

impl Shop {
    /// Apply a local edit, reporting failures as a toast.
    pub fn edit<T>(&self, f: impl FnOnce(&mut AppStore) -> Result<T, StoreError>) -> Option<T> {
        match self.store.try_update(f)? {
            Ok(value) => Some(value),
            Err(e) => {
                self.toasts.error(e.to_string());
                None
            }
        }
    }

    /// Settle an optimistic edit with the server's answer.
    fn settle<T>(
        &self,
        result: Result<T, ServerFnError>,
        apply: impl FnOnce(&mut AppStore, T) -> Result<(), StoreError>,
        rollback: impl FnOnce(&mut AppStore) -> Result<(), StoreError>,
    ) {
        match result {
            Ok(value) => {
                self.edit(|s| apply(s, value));
            }
            Err(e) => {
                self.edit(rollback);
                self.toasts.error(error_message(&e));
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.with_untracked(|s| s.auth.is_authenticated())
    }

    /// Adopt the backend's session, cart and wishlist.
    pub fn sync_session(self) {
        spawn_local(async move {
            let user = api::current_user().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "session lookup failed");
                None
            });
            let signed_in = user.is_some();
            self.store.update(|s| s.auth.set_user(user));
            if !signed_in {
                return;
            }
            if let Ok(cart) = api::fetch_cart().await {
                self.edit(|s| s.cart.apply_server(cart, None));
            }
            if let Ok(items) = api::fetch_wishlist().await {
                self.edit(|s| s.wishlist.apply_server(items, None));
            }
        });
    }

    /// Re-read the cart after the backend changed it (order placed).
    pub fn refresh_cart(self) {
        spawn_local(async move {
            match api::fetch_cart().await {
                Ok(cart) => {
                    self.edit(|s| s.cart.apply_server(cart, None));
                }
                Err(e) => tracing::warn!(error = %e, "cart refresh failed"),
            }
        });
    }

    pub fn add_to_bag(self, line: CartLine) {
        let title = line.title.clone();
        let Some((op, body)) = self.edit(|s| s.cart.add(line)) else {
            return;
        };
        self.toasts.success(format!("{title} added to your bag"));
        spawn_local(async move {
            let result = api::add_to_cart(body).await;
            self.settle(result, |s, cart| s.cart.apply_server(cart, Some(op)), |s| s.cart.rollback(op));
        });
    }

    /// Change a line's quantity; zero removes it.
    pub fn set_quantity(self, id: LineItemId, quantity: u32) {
        let Some(op) = self.edit(|s| s.cart.set_quantity(&id, quantity)) else {
            return;
        };
        spawn_local(async move {
            let result = if quantity == 0 {
                api::remove_cart_line(id).await
            } else {
                api::update_cart_quantity(id, quantity).await
            };
            self.settle(result, |s, cart| s.cart.apply_server(cart, Some(op)), |s| s.cart.rollback(op));
        });
    }

    pub fn remove_line(self, id: LineItemId) {
        let Some(op) = self.edit(|s| s.cart.remove(&id)) else {
            return;
        };
        spawn_local(async move {
            let result = api::remove_cart_line(id).await;
            self.settle(result, |s, cart| s.cart.apply_server(cart, Some(op)), |s| s.cart.rollback(op));
        });
    }

    pub fn clear_bag(self) {
        let Some(op) = self.edit(|s| s.cart.clear()) else {
            return;
        };
        spawn_local(async move {
            let result = api::clear_cart().await;
            self.settle(result, |s, cart| s.cart.apply_server(cart, Some(op)), |s| s.cart.rollback(op));
        });
    }

    /// Heart button. Saving needs an account.
    pub fn toggle_wishlist(self, product: Product) {
        if !self.is_signed_in() {
            self.toasts.info("Sign in to save items to your wishlist");
            return;
        }
        let Some((op, toggle)) = self.edit(|s| s.wishlist.toggle(&product)) else {
            return;
        };
        let product_id = product.id;
        spawn_local(async move {
            let result = match toggle {
                Toggle::Added => api::add_to_wishlist(product_id).await,
                Toggle::Removed => api::remove_from_wishlist(product_id).await,
            };
            self.settle(
                result,
                |s, items| s.wishlist.apply_server(items, Some(op)),
                |s| s.wishlist.rollback(op),
            );
        });
    }

    pub fn remove_from_wishlist(self, product_id: ProductId) {
        let Some(op) = self.edit(|s| s.wishlist.remove(&product_id)) else {
            return;
        };
        spawn_local(async move {
            let result = api::remove_from_wishlist(product_id).await;
            self.settle(
                result,
                |s, items| s.wishlist.apply_server(items, Some(op)),
                |s| s.wishlist.rollback(op),
            );
        });
    }

    /// Start a single-item checkout. False when the line was rejected.
    pub fn start_buy_now(self, line: CartLine) -> bool {
        self.edit(|s| s.buy_now.set(line).map(|_| ())).is_some()
    }

    pub fn signed_in(self, user: User) {
        self.store.update(|s| s.login(user));
        self.sync_session();
    }

    pub fn sign_out(self) {
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                tracing::warn!(error = %e, "logout request failed");
            }
            self.edit(AppStore::logout);
            self.toasts.info("You have been signed out");
        });
    }
}
