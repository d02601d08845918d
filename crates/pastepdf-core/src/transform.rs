//! Pointer drag state machine for moving, resizing, panning and crop dragging.

use crate::canvas::CanvasDocument;
use crate::geometry::{self, Handle};
use crate::item::ItemId;
use kurbo::{Point, Rect, Vec2};

/// Offset of one dragged item from the pointer, captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveAnchor {
    pub item: ItemId,
    /// Pointer position minus item origin.
    pub offset: Vec2,
}

/// The single active pointer gesture.
///
/// Exists between pointer-down and pointer-up only; pointer-up resets it to
/// [`DragState::Idle`] whatever the variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Selected items follow the pointer, each at its own fixed offset.
    Moving { anchors: Vec<MoveAnchor> },
    /// One item resized by a handle, preserving its aspect ratio.
    Resizing {
        item: ItemId,
        handle: Handle,
        start: Point,
        original: Rect,
    },
    /// The view is panned. Positions are in screen space.
    Panning { start: Point, original_offset: Vec2 },
    /// The crop rectangle is moved. Positions are item-local.
    CroppingMove { start: Point, original: Rect },
    /// The crop rectangle is resized by a handle. Positions are item-local.
    CroppingResize {
        handle: Handle,
        start: Point,
        original: Rect,
    },
}

impl DragState {
    /// Start moving `items`, anchoring each to `pointer`. Unknown ids are skipped.
    pub fn begin_move(document: &CanvasDocument, items: &[ItemId], pointer: Point) -> Self {
        let anchors = items
            .iter()
            .filter_map(|&id| document.get(id))
            .map(|item| MoveAnchor {
                item: item.id(),
                offset: pointer - item.origin(),
            })
            .collect();
        DragState::Moving { anchors }
    }

    /// Start resizing `item` from `handle`.
    pub fn begin_resize(
        document: &CanvasDocument,
        item: ItemId,
        handle: Handle,
        pointer: Point,
    ) -> Option<Self> {
        let original = document.get(item)?.bounds();
        Some(DragState::Resizing {
            item,
            handle,
            start: pointer,
            original,
        })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Whether this gesture holds a reference to `id`.
    pub fn references(&self, id: ItemId) -> bool {
        match self {
            DragState::Moving { anchors } => anchors.iter().any(|anchor| anchor.item == id),
            DragState::Resizing { item, .. } => *item == id,
            _ => false,
        }
    }

    /// Apply a canvas-space pointer position to the items this gesture drives.
    ///
    /// Returns true if any item changed. Panning and crop gestures are driven
    /// by the view and crop session instead and return false here.
    pub fn drag_items(&self, document: &mut CanvasDocument, pointer: Point) -> bool {
        match self {
            DragState::Moving { anchors } => {
                let mut moved = false;
                for anchor in anchors {
                    if let Some(item) = document.get_mut(anchor.item) {
                        item.move_to(pointer - anchor.offset);
                        moved = true;
                    }
                }
                moved
            }
            DragState::Resizing {
                item,
                handle,
                start,
                original,
            } => match document.get_mut(*item) {
                Some(item) => {
                    let resized = geometry::resize_preserving_aspect(
                        *original,
                        *handle,
                        pointer - *start,
                        item.aspect_ratio,
                    );
                    item.set_bounds(resized);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetId, AssetKind};
    use crate::canvas::tests::page;
    use kurbo::Size;

    fn document() -> (CanvasDocument, ItemId, ItemId) {
        let mut doc = CanvasDocument::new();
        let asset = AssetId::new();
        let a = doc.add_item(
            asset,
            AssetKind::Pdf,
            &page(0, 200.0, 100.0),
            Point::new(0.0, 0.0),
            Size::new(100.0, 50.0),
        );
        let b = doc.add_item(
            asset,
            AssetKind::Pdf,
            &page(1, 200.0, 200.0),
            Point::new(200.0, 100.0),
            Size::new(40.0, 40.0),
        );
        (doc, a, b)
    }

    #[test]
    fn test_group_move_preserves_layout() {
        let (mut doc, a, b) = document();
        let drag = DragState::begin_move(&doc, &[a, b], Point::new(10.0, 10.0));

        assert!(drag.drag_items(&mut doc, Point::new(35.0, -5.0)));
        assert_eq!(doc.get(a).unwrap().origin(), Point::new(25.0, -15.0));
        assert_eq!(doc.get(b).unwrap().origin(), Point::new(225.0, 85.0));

        // Offsets are captured once; later moves re-anchor to the same offsets.
        drag.drag_items(&mut doc, Point::new(10.0, 10.0));
        assert_eq!(doc.get(a).unwrap().origin(), Point::ZERO);
    }

    #[test]
    fn test_resize_from_snapshot() {
        let (mut doc, a, _) = document();
        let drag =
            DragState::begin_resize(&doc, a, Handle::SouthEast, Point::new(100.0, 50.0)).unwrap();

        drag.drag_items(&mut doc, Point::new(130.0, 90.0));
        drag.drag_items(&mut doc, Point::new(150.0, 50.0));
        let item = doc.get(a).unwrap();
        assert_eq!(item.bounds(), Rect::new(0.0, 0.0, 150.0, 75.0));
        assert!((item.width / item.height - item.aspect_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_resize_never_below_minimum() {
        let (mut doc, a, _) = document();
        let drag = DragState::begin_resize(&doc, a, Handle::NorthWest, Point::ZERO).unwrap();
        drag.drag_items(&mut doc, Point::new(500.0, 500.0));
        let item = doc.get(a).unwrap();
        assert!(item.width >= geometry::MIN_SIZE);
        assert!(item.height >= geometry::MIN_SIZE);
        assert!((item.bounds().x1 - 100.0).abs() < 1e-9);
        assert!((item.bounds().y1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_references() {
        let (doc, a, b) = document();
        let drag = DragState::begin_move(&doc, &[a], Point::ZERO);
        assert!(drag.references(a));
        assert!(!drag.references(b));
        assert!(DragState::begin_resize(&doc, ItemId(42), Handle::East, Point::ZERO).is_none());
        assert!(!DragState::Idle.references(a));
    }

    #[test]
    fn test_non_item_gestures_do_not_touch_items() {
        let (mut doc, a, _) = document();
        let pan = DragState::Panning {
            start: Point::ZERO,
            original_offset: Vec2::ZERO,
        };
        assert!(!pan.drag_items(&mut doc, Point::new(50.0, 50.0)));
        assert_eq!(doc.get(a).unwrap().origin(), Point::ZERO);
    }
}
