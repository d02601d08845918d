//! Single and multi selection.

use crate::item::ItemId;
use serde::{Deserialize, Serialize};

/// Shape of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Single(ItemId),
    Multi(usize),
}

/// Ordered set of selected items.
///
/// Insertion order is kept; the first element is the primary item used by
/// layer-order commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    items: Vec<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// The item layer-order commands act on.
    pub fn primary(&self) -> Option<ItemId> {
        self.items.first().copied()
    }

    /// The selected item, if exactly one is selected.
    pub fn single(&self) -> Option<ItemId> {
        match self.items.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    pub fn state(&self) -> SelectionState {
        match self.items.as_slice() {
            [] => SelectionState::Empty,
            [id] => SelectionState::Single(*id),
            items => SelectionState::Multi(items.len()),
        }
    }

    /// Add an item; returns false if it was already selected.
    pub fn add(&mut self, id: ItemId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.items.push(id);
        true
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|&item| item != id);
        self.items.len() != before
    }

    /// Add the item if absent, remove it if present.
    pub fn toggle(&mut self, id: ItemId) {
        if !self.remove(id) {
            self.items.push(id);
        }
    }

    /// Select exactly one item.
    pub fn replace(&mut self, id: ItemId) {
        self.items.clear();
        self.items.push(id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn retain(&mut self, mut keep: impl FnMut(ItemId) -> bool) {
        self.items.retain(|&id| keep(id));
    }

    /// Apply a left click on an item.
    ///
    /// With the multi-select modifier the item's membership toggles. Without
    /// it, clicking a member of a multi-selection keeps the group so it can be
    /// dragged together; anything else narrows to the clicked item.
    pub fn click(&mut self, id: ItemId, multi: bool) {
        if multi {
            self.toggle(id);
        } else if !(self.items.len() > 1 && self.contains(id)) {
            self.replace(id);
        }
    }

    /// Apply a right click on an item before the context menu opens.
    pub fn context_click(&mut self, id: ItemId) {
        if !self.contains(id) {
            self.replace(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ItemId = ItemId(1);
    const B: ItemId = ItemId(2);
    const C: ItemId = ItemId(3);

    #[test]
    fn test_modifier_click_toggles() {
        let mut selection = Selection::new();
        selection.click(A, false);
        selection.click(B, true);
        assert_eq!(selection.ids(), &[A, B]);
        selection.click(A, true);
        assert_eq!(selection.ids(), &[B]);
        selection.click(B, true);
        assert_eq!(selection.state(), SelectionState::Empty);
    }

    #[test]
    fn test_click_member_keeps_group() {
        let mut selection = Selection::new();
        selection.click(A, false);
        selection.click(B, true);
        selection.click(B, false);
        assert_eq!(selection.state(), SelectionState::Multi(2));

        selection.click(C, false);
        assert_eq!(selection.state(), SelectionState::Single(C));
    }

    #[test]
    fn test_click_selected_single_stays_single() {
        let mut selection = Selection::new();
        selection.click(A, false);
        selection.click(A, false);
        assert_eq!(selection.single(), Some(A));
    }

    #[test]
    fn test_context_click() {
        let mut selection = Selection::new();
        selection.click(A, false);
        selection.click(B, true);

        selection.context_click(B);
        assert_eq!(selection.len(), 2);

        selection.context_click(C);
        assert_eq!(selection.ids(), &[C]);
    }

    #[test]
    fn test_primary_is_first_selected() {
        let mut selection = Selection::new();
        assert_eq!(selection.primary(), None);
        selection.add(B);
        selection.add(A);
        assert!(!selection.add(B));
        assert_eq!(selection.primary(), Some(B));
        assert_eq!(selection.single(), None);
    }
}
