//! Align and distribute operations over a set of items.

use crate::canvas::CanvasDocument;
use crate::error::{require_selection, EditorResult};
use crate::geometry;
use crate::item::ItemId;
use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Edge or center to align to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignMode {
    Left,
    HorizontalCenter,
    Right,
    Top,
    VerticalCenter,
    Bottom,
}

/// Axis to distribute along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributeMode {
    Horizontal,
    Vertical,
}

fn collect(document: &CanvasDocument, ids: &[ItemId]) -> Vec<(ItemId, Rect)> {
    ids.iter()
        .filter_map(|&id| document.get(id))
        .map(|item| (item.id(), item.bounds()))
        .collect()
}

fn translate(document: &mut CanvasDocument, id: ItemId, delta: Vec2) {
    if let Some(item) = document.get_mut(id) {
        item.translate(delta);
    }
}

/// Align every item to the selection's bounding box. Requires at least two items.
pub fn align(document: &mut CanvasDocument, ids: &[ItemId], mode: AlignMode) -> EditorResult<()> {
    let items = collect(document, ids);
    require_selection("Align", "at least 2", items.len(), 2, usize::MAX)?;
    let Some(overall) = geometry::union_bounds(items.iter().map(|(_, r)| *r)) else {
        return Ok(());
    };

    for (id, b) in items {
        let delta = match mode {
            AlignMode::Left => Vec2::new(overall.x0 - b.x0, 0.0),
            AlignMode::HorizontalCenter => Vec2::new(overall.center().x - b.center().x, 0.0),
            AlignMode::Right => Vec2::new(overall.x1 - b.x1, 0.0),
            AlignMode::Top => Vec2::new(0.0, overall.y0 - b.y0),
            AlignMode::VerticalCenter => Vec2::new(0.0, overall.center().y - b.center().y),
            AlignMode::Bottom => Vec2::new(0.0, overall.y1 - b.y1),
        };
        translate(document, id, delta);
    }
    log::info!("Aligned {} items ({:?})", ids.len(), mode);
    Ok(())
}

/// Space items evenly along an axis. Requires at least three items.
///
/// The first and last items by position stay put; the others are laid out
/// between them with equal edge-to-edge gaps. The gap goes negative when
/// the middle items are wider than the space between the anchors.
pub fn distribute(
    document: &mut CanvasDocument,
    ids: &[ItemId],
    mode: DistributeMode,
) -> EditorResult<()> {
    let mut items = collect(document, ids);
    require_selection("Distribute", "at least 3", items.len(), 3, usize::MAX)?;

    let (start, extent): (fn(&Rect) -> f64, fn(&Rect) -> f64) = match mode {
        DistributeMode::Horizontal => (|r| r.x0, Rect::width),
        DistributeMode::Vertical => (|r| r.y0, Rect::height),
    };
    items.sort_by(|a, b| start(&a.1).total_cmp(&start(&b.1)));

    let (Some((_, first)), Some((_, last))) = (items.first(), items.last()) else {
        return Ok(());
    };
    let first_edge = start(first) + extent(first);
    let last_edge = start(last);
    let middle = &items[1..items.len() - 1];
    let middle_extent: f64 = middle.iter().map(|(_, r)| extent(r)).sum();
    let gap = (last_edge - first_edge - middle_extent) / (items.len() - 1) as f64;

    let mut cursor = first_edge + gap;
    for &(id, rect) in middle {
        let offset = cursor - start(&rect);
        let delta = match mode {
            DistributeMode::Horizontal => Vec2::new(offset, 0.0),
            DistributeMode::Vertical => Vec2::new(0.0, offset),
        };
        translate(document, id, delta);
        cursor += extent(&rect) + gap;
    }
    log::info!("Distributed {} items ({:?}), gap {:.2}", items.len(), mode, gap);
    Ok(())
}

/// Move the items together so their bounding box is centered on the canvas.
pub fn center_on_canvas(
    document: &mut CanvasDocument,
    ids: &[ItemId],
    canvas: Size,
) -> EditorResult<()> {
    let items = collect(document, ids);
    require_selection("Center on canvas", "at least 1", items.len(), 1, usize::MAX)?;
    let Some(overall) = geometry::union_bounds(items.iter().map(|(_, r)| *r)) else {
        return Ok(());
    };

    let target = Rect::from_origin_size(kurbo::Point::ZERO, canvas).center();
    let delta = target - overall.center();
    for (id, _) in items {
        translate(document, id, delta);
    }
    log::info!("Centered {} items on canvas", ids.len());
    Ok(())
}
