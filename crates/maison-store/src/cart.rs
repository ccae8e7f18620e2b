//! Cart state: server-synced lines with optimistic edits.

use crate::persist::Slot;
use crate::synced::{Keyed, ListOp, OpId, SyncedList};
use crate::StoreError;
use maison_commerce::cart::{Cart, CartLine, LineKey, NewCartLine};
use maison_commerce::ids::LineItemId;
use maison_commerce::{CommerceError, Currency, Money};
use serde::{Deserialize, Serialize};

impl Keyed for CartLine {
    type Key = LineKey;

    fn key(&self) -> LineKey {
        CartLine::key(self)
    }
}

/// What gets persisted: the visible cart at the time of the last change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
struct CartSnapshot {
    lines: Vec<CartLine>,
    currency: Currency,
}

#[derive(Debug, Clone)]
pub struct CartStore {
    list: SyncedList<CartLine>,
    currency: Currency,
    slot: Slot,
}

impl CartStore {
    /// An empty cart that persists to `slot`.
    pub fn new(slot: Slot) -> Self {
        Self {
            list: SyncedList::default(),
            currency: Currency::default(),
            slot,
        }
    }

    /// Restore from persisted state, or start empty.
    pub fn hydrate(slot: Slot) -> Result<Self, StoreError> {
        let snapshot: CartSnapshot = slot.load()?.unwrap_or_default();
        tracing::debug!(key = slot.key(), lines = snapshot.lines.len(), "cart hydrated");
        Ok(Self {
            list: SyncedList::new(snapshot.lines),
            currency: snapshot.currency,
            slot,
        })
    }

    /// The cart as the shopper sees it, pending edits included.
    pub fn cart(&self) -> Cart {
        Cart {
            lines: self.list.visible(),
            currency: self.currency,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.cart().item_count()
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.cart().subtotal()
    }

    pub fn is_syncing(&self) -> bool {
        self.list.is_syncing()
    }

    /// Optimistically add `line`, merging with a line of the same variant.
    /// Returns the op to settle and the request body to send.
    pub fn add(&mut self, line: CartLine) -> Result<(OpId, NewCartLine), StoreError> {
        let request = NewCartLine::from(&line);
        let mut cart = self.cart();
        let id = cart.add(line)?;
        let merged = cart
            .line(&id)
            .cloned()
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        let op = self.record(ListOp::Upsert(merged))?;
        Ok((op, request))
    }

    /// Optimistically change a line's quantity; zero removes it.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: u32) -> Result<OpId, StoreError> {
        let mut cart = self.cart();
        let key = cart
            .line(id)
            .map(CartLine::key)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        cart.set_quantity(id, quantity)?;

        match cart.line(id) {
            Some(updated) => self.record(ListOp::Upsert(updated.clone())),
            None => self.record(ListOp::Remove(key)),
        }
    }

    pub fn remove(&mut self, id: &LineItemId) -> Result<OpId, StoreError> {
        let key = self
            .cart()
            .line(id)
            .map(CartLine::key)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        self.record(ListOp::Remove(key))
    }

    pub fn clear(&mut self) -> Result<OpId, StoreError> {
        self.record(ListOp::Clear)
    }

    /// Adopt the backend's cart as the new snapshot, settling `ack`.
    pub fn apply_server(&mut self, cart: Cart, ack: Option<OpId>) -> Result<(), StoreError> {
        self.currency = cart.currency;
        self.list.apply_server(cart.lines, ack);
        self.persist()
    }

    /// Undo a failed optimistic edit.
    pub fn rollback(&mut self, op: OpId) -> Result<(), StoreError> {
        if self.list.rollback(op) {
            self.persist()?;
        }
        Ok(())
    }

    /// Drop all state, persisted copy included (logout).
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.slot.clear()?;
        self.list.reset();
        Ok(())
    }

    /// Queue `op` and persist the result. An op that cannot be persisted
    /// is withdrawn, so callers never hold an op they cannot settle.
    fn record(&mut self, op: ListOp<CartLine>) -> Result<OpId, StoreError> {
        let id = self.list.push(op);
        if let Err(e) = self.persist() {
            self.list.rollback(id);
            return Err(e);
        }
        Ok(id)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.slot.save(&CartSnapshot {
            lines: self.list.visible(),
            currency: self.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::tests::read_only_cache;
    use maison_cache::{Cache, SessionId};
    use maison_commerce::ids::ProductId;

    fn slot(cache: &Cache) -> Slot {
        Slot::new(cache.clone(), &SessionId::new("sess_t"), "cart")
    }

    fn line(id: &str, product: &str, qty: u32) -> CartLine {
        CartLine {
            id: LineItemId::new(id),
            product_id: ProductId::new(product),
            handle: product.to_string(),
            title: product.to_string(),
            image: None,
            size: Some("M".to_string()),
            color: None,
            quantity: qty,
            unit_price: Money::new(1_000, Currency::INR),
        }
    }

    #[test]
    fn test_add_is_visible_and_persisted() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        let (_, request) = store.add(line("l1", "p1", 2)).unwrap();
        assert_eq!(request.quantity, 2);
        assert_eq!(store.item_count(), 2);
        assert!(store.is_syncing());

        let restored = CartStore::hydrate(slot(&cache)).unwrap();
        assert_eq!(restored.item_count(), 2);
        assert!(!restored.is_syncing());
    }

    #[test]
    fn test_add_merges_and_sends_increment() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        store.apply_server(Cart { lines: vec![line("srv1", "p1", 1)], currency: Currency::INR }, None).unwrap();

        let (_, request) = store.add(line("local", "p1", 2)).unwrap();
        assert_eq!(request.quantity, 2);
        let cart = store.cart();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.lines[0].id.as_str(), "srv1");
    }

    #[test]
    fn test_add_over_limit_rejected_without_op() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        store.add(line("l1", "p1", 60)).unwrap();
        assert!(matches!(
            store.add(line("l2", "p1", 60)),
            Err(StoreError::Commerce(CommerceError::QuantityExceedsLimit(120, 99)))
        ));
        assert_eq!(store.item_count(), 60);
    }

    #[test]
    fn test_server_ack_and_rollback() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        let (op, _) = store.add(line("l1", "p1", 1)).unwrap();
        store
            .apply_server(Cart { lines: vec![line("srv1", "p1", 1)], currency: Currency::INR }, Some(op))
            .unwrap();
        assert!(!store.is_syncing());

        let id = LineItemId::new("srv1");
        let op = store.set_quantity(&id, 4).unwrap();
        assert_eq!(store.item_count(), 4);
        store.rollback(op).unwrap();
        assert_eq!(store.item_count(), 1);

        let op = store.remove(&id).unwrap();
        assert_eq!(store.item_count(), 0);
        store.rollback(op).unwrap();
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        store.add(line("l1", "p1", 1)).unwrap();
        store.set_quantity(&LineItemId::new("l1"), 0).unwrap();
        assert!(store.cart().is_empty());
        assert!(store.set_quantity(&LineItemId::new("l1"), 1).is_err());
    }

    #[test]
    fn test_reset_clears_storage() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        store.add(line("l1", "p1", 1)).unwrap();
        store.reset().unwrap();
        assert!(store.cart().is_empty());
        assert!(!cache.exists("maison:sess_t:cart").unwrap());
    }

    #[test]
    fn test_unpersisted_edit_is_withdrawn() {
        let cache = read_only_cache();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        assert!(matches!(store.add(line("l1", "p1", 1)), Err(StoreError::Cache(_))));
        assert_eq!(store.item_count(), 0);
        assert!(!store.is_syncing());
        assert!(store.clear().is_err());
        assert!(!store.is_syncing());
    }

    #[test]
    fn test_failed_reset_keeps_state() {
        let cache = Cache::in_memory();
        let mut store = CartStore::hydrate(slot(&cache)).unwrap();
        store.apply_server(Cart { lines: vec![line("srv1", "p1", 2)], currency: Currency::INR }, None).unwrap();

        store.slot = slot(&read_only_cache());
        assert!(store.reset().is_err());
        assert_eq!(store.item_count(), 2);
    }
}
