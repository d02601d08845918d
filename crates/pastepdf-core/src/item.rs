//! Placed canvas items.

use crate::assets::{AssetId, AssetKind};
use crate::geometry::{self, Rotation};
use crate::images::ImageHandle;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a placed item, assigned monotonically by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rectangle in an asset page's native pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Corner form `[x0, y0, x1, y1]`.
    pub fn clip(&self) -> [f64; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether the region lies within a page of `native` size.
    pub fn fits_within(&self, native: Size) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= native.width
            && self.y + self.height <= native.height
    }
}

/// One placed, transformable instance of a source page on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    pub(crate) id: ItemId,
    pub asset_id: AssetId,
    pub page_index: usize,
    pub kind: AssetKind,
    /// Top-left corner, canvas units.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Rotation,
    /// Width over height, fixed at creation and on each crop commit.
    pub aspect_ratio: f64,
    /// Pixels currently displayed.
    pub image: ImageHandle,
    /// Source region in native pixels, if cropped.
    pub crop: Option<CropRegion>,
}

impl CanvasItem {
    pub(crate) fn new(
        id: ItemId,
        asset_id: AssetId,
        page_index: usize,
        kind: AssetKind,
        bounds: Rect,
        image: ImageHandle,
    ) -> Self {
        Self {
            id,
            asset_id,
            page_index,
            kind,
            x: bounds.x0,
            y: bounds.y0,
            width: bounds.width(),
            height: bounds.height(),
            rotation: Rotation::Deg0,
            aspect_ratio: bounds.width() / bounds.height(),
            image,
            crop: None,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Axis-aligned bounds, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn set_bounds(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn move_to(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Advance rotation by a quarter turn.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Visual transform for the renderer (rotation about the item center).
    pub fn render_transform(&self) -> Affine {
        self.rotation.transform_about(self.bounds())
    }

    /// Hit test against the unrotated bounds, edges included.
    pub fn contains(&self, point: Point) -> bool {
        geometry::contains_point(self.bounds(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CanvasItem {
        CanvasItem::new(
            ItemId(1),
            AssetId::new(),
            0,
            AssetKind::Pdf,
            Rect::new(10.0, 20.0, 210.0, 120.0),
            ImageHandle::new("thumb"),
        )
    }

    #[test]
    fn test_new_item_defaults() {
        let item = item();
        assert_eq!(item.size(), Size::new(200.0, 100.0));
        assert!((item.aspect_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(item.rotation, Rotation::Deg0);
        assert!(item.crop.is_none());
    }

    #[test]
    fn test_hit_test_ignores_rotation() {
        let mut item = item();
        item.rotate();
        assert_eq!(item.rotation.degrees(), 90);
        // Inside the unrotated box, outside the rotated one.
        assert!(item.contains(Point::new(15.0, 25.0)));
        assert!(item.contains(Point::new(210.0, 120.0)));
        assert!(!item.contains(Point::new(110.0, 150.0)));
    }

    #[test]
    fn test_translate_and_move() {
        let mut item = item();
        item.translate(Vec2::new(5.0, -5.0));
        assert_eq!(item.origin(), Point::new(15.0, 15.0));
        item.move_to(Point::ZERO);
        assert_eq!(item.bounds(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_crop_region_clip() {
        let crop = CropRegion::new(200.0, 0.0, 400.0, 400.0);
        assert_eq!(crop.clip(), [200.0, 0.0, 600.0, 400.0]);
        assert!(crop.fits_within(Size::new(800.0, 400.0)));
        assert!(!crop.fits_within(Size::new(500.0, 400.0)));
        assert!((crop.aspect_ratio() - 1.0).abs() < f64::EPSILON);
    }
}
