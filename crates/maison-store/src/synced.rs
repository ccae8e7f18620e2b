//! Server-synced collections with optimistic local edits.
//!
//! A [`SyncedList`] holds the last snapshot the backend returned plus a queue
//! of local operations not yet confirmed. The visible value is the snapshot
//! with the queue replayed on top. When a response arrives the snapshot is
//! replaced and the acknowledged operation leaves the queue; when a request
//! fails its operation is rolled back and the view reverts.

use serde::{Deserialize, Serialize};

/// Items with a stable identity inside a list.
pub trait Keyed {
    type Key: PartialEq + Clone + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// Handle for a pending optimistic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpId(u64);

/// A local edit awaiting confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ListOp<T: Keyed> {
    /// Replace the item with the same key, or append it.
    Upsert(T),
    Remove(T::Key),
    Clear,
}

impl<T: Keyed + Clone> ListOp<T> {
    fn apply(&self, items: &mut Vec<T>) {
        match self {
            ListOp::Upsert(item) => {
                let key = item.key();
                match items.iter_mut().find(|i| i.key() == key) {
                    Some(existing) => *existing = item.clone(),
                    None => items.push(item.clone()),
                }
            }
            ListOp::Remove(key) => items.retain(|i| &i.key() != key),
            ListOp::Clear => items.clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Pending<T: Keyed> {
    id: OpId,
    op: ListOp<T>,
}

/// Last server snapshot plus unconfirmed local operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedList<T: Keyed> {
    snapshot: Vec<T>,
    pending: Vec<Pending<T>>,
    next_op: u64,
}

impl<T: Keyed + Clone> Default for SyncedList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Keyed + Clone> SyncedList<T> {
    pub fn new(snapshot: Vec<T>) -> Self {
        Self {
            snapshot,
            pending: Vec::new(),
            next_op: 0,
        }
    }

    /// The snapshot with pending operations applied in order.
    pub fn visible(&self) -> Vec<T> {
        let mut items = self.snapshot.clone();
        for pending in &self.pending {
            pending.op.apply(&mut items);
        }
        items
    }

    /// The last server snapshot, ignoring local edits.
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_syncing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Visible item with `key`.
    pub fn get(&self, key: &T::Key) -> Option<T> {
        self.visible().into_iter().find(|i| &i.key() == key)
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.get(key).is_some()
    }

    /// Queue a local operation; it is visible immediately.
    pub fn push(&mut self, op: ListOp<T>) -> OpId {
        let id = OpId(self.next_op);
        self.next_op += 1;
        self.pending.push(Pending { id, op });
        id
    }

    /// Replace the snapshot with the server's answer to `ack`. Other pending
    /// operations stay queued and are replayed on top of the new snapshot.
    pub fn apply_server(&mut self, snapshot: Vec<T>, ack: Option<OpId>) {
        self.snapshot = snapshot;
        if let Some(ack) = ack {
            self.pending.retain(|p| p.id != ack);
        }
    }

    /// Drop a failed operation. Returns false if it was already gone.
    pub fn rollback(&mut self, id: OpId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        let removed = self.pending.len() != before;
        if removed {
            tracing::debug!(op = id.0, "optimistic operation rolled back");
        }
        removed
    }

    /// Forget everything, confirmed or not.
    pub fn reset(&mut self) {
        self.snapshot.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        qty: u32,
    }

    impl Keyed for Item {
        type Key = u32;
        fn key(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32, qty: u32) -> Item {
        Item { id, qty }
    }

    #[test]
    fn test_pending_ops_are_visible() {
        let mut list = SyncedList::new(vec![item(1, 1)]);
        list.push(ListOp::Upsert(item(2, 1)));
        list.push(ListOp::Upsert(item(1, 5)));
        assert_eq!(list.visible(), vec![item(1, 5), item(2, 1)]);
        assert_eq!(list.snapshot(), &[item(1, 1)]);
        assert!(list.is_syncing());
    }

    #[test]
    fn test_apply_server_acknowledges_one_op() {
        let mut list = SyncedList::new(vec![]);
        let add_a = list.push(ListOp::Upsert(item(1, 1)));
        let _add_b = list.push(ListOp::Upsert(item(2, 1)));

        list.apply_server(vec![item(1, 1)], Some(add_a));
        assert_eq!(list.pending_len(), 1);
        assert_eq!(list.visible(), vec![item(1, 1), item(2, 1)]);
    }

    #[test]
    fn test_server_wins_over_stale_snapshot() {
        let mut list = SyncedList::new(vec![item(1, 1)]);
        list.apply_server(vec![item(1, 3), item(9, 1)], None);
        assert_eq!(list.visible(), vec![item(1, 3), item(9, 1)]);
    }

    #[test]
    fn test_rollback_reverts_view() {
        let mut list = SyncedList::new(vec![item(1, 1), item(2, 2)]);
        let remove = list.push(ListOp::Remove(2));
        assert!(!list.contains(&2));

        assert!(list.rollback(remove));
        assert!(!list.rollback(remove));
        assert_eq!(list.get(&2), Some(item(2, 2)));
    }

    #[test]
    fn test_clear_then_add() {
        let mut list = SyncedList::new(vec![item(1, 1), item(2, 1)]);
        list.push(ListOp::Clear);
        list.push(ListOp::Upsert(item(3, 1)));
        assert_eq!(list.visible(), vec![item(3, 1)]);

        list.reset();
        assert!(list.visible().is_empty());
        assert!(!list.is_syncing());
    }

    #[test]
    fn test_op_ids_are_unique() {
        let mut list: SyncedList<Item> = SyncedList::default();
        let a = list.push(ListOp::Clear);
        let b = list.push(ListOp::Clear);
        assert_ne!(a, b);
    }
}
