//! Single-product checkout held outside the cart.

use crate::persist::Slot;
use crate::StoreError;
use chrono::Utc;
use maison_commerce::cart::{BuyNow, CartLine};

#[derive(Debug, Clone)]
pub struct BuyNowStore {
    current: Option<BuyNow>,
    slot: Slot,
}

impl BuyNowStore {
    pub fn new(slot: Slot) -> Self {
        Self { current: None, slot }
    }

    pub fn hydrate(slot: Slot) -> Result<Self, StoreError> {
        Ok(Self {
            current: slot.load()?,
            slot,
        })
    }

    pub fn get(&self) -> Option<&BuyNow> {
        self.current.as_ref()
    }

    /// Start a buy-now checkout, replacing any earlier one. The cart is
    /// left untouched.
    pub fn set(&mut self, line: CartLine) -> Result<&BuyNow, StoreError> {
        let buy_now = BuyNow::new(line, Utc::now())?;
        self.slot.save(&buy_now)?;
        tracing::debug!(product = %buy_now.line.product_id, "buy-now started");
        Ok(self.current.insert(buy_now))
    }

    /// Called after the order is placed or checkout is abandoned.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.slot.clear()?;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::tests::read_only_cache;
    use maison_cache::{Cache, SessionId};
    use maison_commerce::ids::{LineItemId, ProductId};
    use maison_commerce::{CommerceError, Currency, Money};

    fn line(qty: u32) -> CartLine {
        CartLine {
            id: LineItemId::generate(),
            product_id: ProductId::new("p1"),
            handle: "p1".to_string(),
            title: "Linen Shirt".to_string(),
            image: None,
            size: None,
            color: None,
            quantity: qty,
            unit_price: Money::new(1_500, Currency::INR),
        }
    }

    fn slot(cache: &Cache) -> Slot {
        Slot::new(cache.clone(), &SessionId::new("sess_b"), "buy-now")
    }

    #[test]
    fn test_set_persists_and_clear_removes() {
        let cache = Cache::in_memory();
        let mut store = BuyNowStore::hydrate(slot(&cache)).unwrap();
        assert!(store.get().is_none());

        store.set(line(2)).unwrap();
        let restored = BuyNowStore::hydrate(slot(&cache)).unwrap();
        assert_eq!(restored.get().map(|b| b.line.quantity), Some(2));
        assert_eq!(restored.get().unwrap().total().unwrap(), Money::new(3_000, Currency::INR));

        store.clear().unwrap();
        assert!(BuyNowStore::hydrate(slot(&cache)).unwrap().get().is_none());
    }

    #[test]
    fn test_invalid_quantity_keeps_previous() {
        let cache = Cache::in_memory();
        let mut store = BuyNowStore::hydrate(slot(&cache)).unwrap();
        store.set(line(1)).unwrap();
        assert!(matches!(
            store.set(line(0)),
            Err(StoreError::Commerce(CommerceError::InvalidQuantity(0)))
        ));
        assert_eq!(store.get().map(|b| b.line.quantity), Some(1));
    }

    #[test]
    fn test_failed_clear_keeps_checkout() {
        let cache = Cache::in_memory();
        let mut store = BuyNowStore::hydrate(slot(&cache)).unwrap();
        store.set(line(1)).unwrap();
        store.slot = slot(&read_only_cache());
        assert!(store.clear().is_err());
        assert!(store.get().is_some());
    }
}
