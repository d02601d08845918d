//! Canvas item list and z-order.

use crate::assets::{AssetId, AssetKind, AssetPage};
use crate::error::{EditorError, EditorResult};
use crate::geometry;
use crate::item::{CanvasItem, ItemId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// The placed items of a composition.
///
/// List order is stacking order: the first item is bottommost, the last topmost.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    items: Vec<CanvasItem>,
    next_id: u64,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a page at `origin` with the given display size, on top of all other items.
    pub fn add_item(
        &mut self,
        asset_id: AssetId,
        kind: AssetKind,
        page: &AssetPage,
        origin: Point,
        size: Size,
    ) -> ItemId {
        self.next_id += 1;
        let id = ItemId(self.next_id);
        let bounds = Rect::from_origin_size(origin, size);
        self.items.push(CanvasItem::new(
            id,
            asset_id,
            page.page_index,
            kind,
            bounds,
            page.thumbnail.clone(),
        ));
        log::info!("Added item {} ({} page {})", id, asset_id, page.page_index);
        id
    }

    /// Remove an item, returning it.
    pub fn remove_item(&mut self, id: ItemId) -> Option<CanvasItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Remove every item placed from `asset_id`, returning their ids.
    pub fn remove_asset_items(&mut self, asset_id: AssetId) -> Vec<ItemId> {
        let removed: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.asset_id == asset_id)
            .map(|item| item.id)
            .collect();
        self.items.retain(|item| item.asset_id != asset_id);
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn require(&self, id: ItemId) -> EditorResult<&CanvasItem> {
        self.get(id).ok_or(EditorError::ItemNotFound(id))
    }

    /// Stacking index of an item; 0 is bottommost.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Items from bottom to top.
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Bring an item to the front (topmost).
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.items.len() => {
                let item = self.items.remove(pos);
                self.items.push(item);
                true
            }
            _ => false,
        }
    }

    /// Send an item to the back (bottommost).
    pub fn send_to_back(&mut self, id: ItemId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                let item = self.items.remove(pos);
                self.items.insert(0, item);
                true
            }
            _ => false,
        }
    }

    /// Move an item one layer forward (towards front).
    /// Returns true if the item was moved, false if already at front.
    pub fn bring_forward(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.index_of(id) {
            if pos + 1 < self.items.len() {
                self.items.swap(pos, pos + 1);
                return true;
            }
        }
        false
    }

    /// Move an item one layer backward (towards back).
    /// Returns true if the item was moved, false if already at back.
    pub fn send_backward(&mut self, id: ItemId) -> bool {
        if let Some(pos) = self.index_of(id) {
            if pos > 0 {
                self.items.swap(pos, pos - 1);
                return true;
            }
        }
        false
    }

    /// Topmost item whose unrotated bounds contain `point`.
    pub fn item_at_point(&self, point: Point) -> Option<ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.contains(point))
            .map(|item| item.id)
    }

    /// Bounding box of the given items, skipping unknown ids.
    pub fn bounds_of(&self, ids: &[ItemId]) -> Option<Rect> {
        geometry::union_bounds(ids.iter().filter_map(|&id| self.get(id)).map(CanvasItem::bounds))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
