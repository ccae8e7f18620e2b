//! Drag-and-drop ordering for admin lists (testimonials, navbar items,
//! homepage sections).
//!
//! While dragging, the list is rearranged live on every `drag_over` so the
//! admin sees the result before dropping. `drop` renumbers positions and
//! reports whether the order changed; `cancel` restores the list as it was
//! when the drag began.

use maison_commerce::content::{HomeSectionEntry, NavItem};
use maison_commerce::testimonial::Testimonial;

/// Items carrying a display position.
pub trait Positioned {
    fn position(&self) -> u32;
    fn set_position(&mut self, position: u32);
}

impl Positioned for Testimonial {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

impl Positioned for NavItem {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

impl Positioned for HomeSectionEntry {
    fn position(&self) -> u32 {
        self.position
    }
    fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Drag<T> {
    /// Where the dragged item currently sits.
    current: usize,
    original: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderList<T> {
    items: Vec<T>,
    drag: Option<Drag<T>>,
}

impl<T: Positioned + Clone + PartialEq> ReorderList<T> {
    /// Wrap `items`, sorted by their current position.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by_key(Positioned::position);
        Self { items, drag: None }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Index of the item being dragged.
    pub fn dragged(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.current)
    }

    pub fn begin_drag(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.drag = Some(Drag {
            current: index,
            original: self.items.clone(),
        });
    }

    /// The pointer is over `index`: move the dragged item there.
    pub fn drag_over(&mut self, index: usize) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if index >= self.items.len() || index == drag.current {
            return;
        }
        let item = self.items.remove(drag.current);
        self.items.insert(index, item);
        drag.current = index;
    }

    /// Finish the drag. Returns true when the order differs from before
    /// the drag, meaning it should be saved.
    pub fn drop(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        renumber(&mut self.items);
        let changed = self.items != drag.original;
        if changed {
            tracing::debug!(to = drag.current, items = self.items.len(), "list reordered");
        }
        changed
    }

    pub fn cancel(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.items = drag.original;
        }
    }

    /// Keyboard and button alternative to dragging.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() || from == to {
            return false;
        }
        self.cancel();
        let item = self.items.remove(from);
        self.items.insert(to, item);
        renumber(&mut self.items);
        true
    }
}

/// Positions become 0, 1, 2, ... in list order.
pub fn renumber<T: Positioned>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_position(i as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        position: u32,
    }

    impl Positioned for Row {
        fn position(&self) -> u32 {
            self.position
        }
        fn set_position(&mut self, position: u32) {
            self.position = position;
        }
    }

    fn list() -> ReorderList<Row> {
        ReorderList::new(vec![
            Row { name: "c", position: 2 },
            Row { name: "a", position: 0 },
            Row { name: "b", position: 1 },
        ])
    }

    fn names(list: &ReorderList<Row>) -> Vec<&'static str> {
        list.items().iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_new_sorts_by_position() {
        assert_eq!(names(&list()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_drag_moves_live_and_drop_renumbers() {
        let mut l = list();
        l.begin_drag(0);
        l.drag_over(1);
        l.drag_over(2);
        assert_eq!(names(&l), vec!["b", "c", "a"]);
        assert_eq!(l.dragged(), Some(2));

        assert!(l.drop());
        assert!(!l.is_dragging());
        let positions: Vec<u32> = l.items().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(l.items()[2].name, "a");
    }

    #[test]
    fn test_drop_in_place_is_unchanged() {
        let mut l = list();
        l.begin_drag(1);
        l.drag_over(2);
        l.drag_over(1);
        assert!(!l.drop());
        assert!(!l.drop());
    }

    #[test]
    fn test_cancel_restores() {
        let mut l = list();
        l.begin_drag(2);
        l.drag_over(0);
        assert_eq!(names(&l), vec!["c", "a", "b"]);
        l.cancel();
        assert_eq!(names(&l), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_item() {
        let mut l = list();
        assert!(l.move_item(2, 0));
        assert_eq!(names(&l), vec!["c", "a", "b"]);
        assert_eq!(l.items()[0].position, 0);
        assert!(!l.move_item(0, 9));
        assert!(!l.move_item(1, 1));
    }

    #[test]
    fn test_out_of_range_drag_ignored() {
        let mut l = list();
        l.begin_drag(7);
        assert!(!l.is_dragging());
        l.drag_over(1);
        assert_eq!(names(&l), vec!["a", "b", "c"]);
    }
}
