//! Saved products.

use crate::persist::Slot;
use crate::synced::{Keyed, ListOp, OpId, SyncedList};
use crate::StoreError;
use maison_commerce::cart::WishlistItem;
use maison_commerce::catalog::Product;
use maison_commerce::ids::ProductId;

impl Keyed for WishlistItem {
    type Key = ProductId;

    fn key(&self) -> ProductId {
        self.product_id.clone()
    }
}

/// Which request a toggle needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Clone)]
pub struct WishlistStore {
    list: SyncedList<WishlistItem>,
    slot: Slot,
}

impl WishlistStore {
    pub fn new(slot: Slot) -> Self {
        Self {
            list: SyncedList::default(),
            slot,
        }
    }

    pub fn hydrate(slot: Slot) -> Result<Self, StoreError> {
        let items: Vec<WishlistItem> = slot.load()?.unwrap_or_default();
        tracing::debug!(key = slot.key(), items = items.len(), "wishlist hydrated");
        Ok(Self {
            list: SyncedList::new(items),
            slot,
        })
    }

    pub fn items(&self) -> Vec<WishlistItem> {
        self.list.visible()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.list.contains(product_id)
    }

    /// Heart button: save if absent, unsave if present.
    pub fn toggle(&mut self, product: &Product) -> Result<(OpId, Toggle), StoreError> {
        if self.contains(&product.id) {
            Ok((self.record(ListOp::Remove(product.id.clone()))?, Toggle::Removed))
        } else {
            Ok((self.record(ListOp::Upsert(WishlistItem::from(product)))?, Toggle::Added))
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Result<OpId, StoreError> {
        self.record(ListOp::Remove(product_id.clone()))
    }

    pub fn apply_server(&mut self, items: Vec<WishlistItem>, ack: Option<OpId>) -> Result<(), StoreError> {
        self.list.apply_server(items, ack);
        self.persist()
    }

    pub fn rollback(&mut self, op: OpId) -> Result<(), StoreError> {
        if self.list.rollback(op) {
            self.persist()?;
        }
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.slot.clear()?;
        self.list.reset();
        Ok(())
    }

    /// Queue `op`, withdrawing it again if it cannot be persisted.
    fn record(&mut self, op: ListOp<WishlistItem>) -> Result<OpId, StoreError> {
        let id = self.list.push(op);
        if let Err(e) = self.persist() {
            self.list.rollback(id);
            return Err(e);
        }
        Ok(id)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.slot.save(&self.list.visible())
    }
}
