//! Modal crop session.
//!
//! The crop rectangle lives in item-local display coordinates, confined to
//! `[0, item.width] x [0, item.height]`. On commit it is scaled into the
//! asset page's native pixel space.

use crate::assets::AssetPage;
use crate::geometry::{self, Handle, CROP_HANDLE_HIT_RADIUS, MIN_SIZE};
use crate::images::{ImageHandle, ImageKey};
use crate::item::{CanvasItem, CropRegion, ItemId};
use crate::transform::DragState;
use kurbo::{Point, Rect, Size, Vec2};

/// State of an active crop.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    target: ItemId,
    /// Item bounds when the session began; items are frozen while cropping.
    item_bounds: Rect,
    rect: Rect,
    native_size: Size,
}

impl CropSession {
    /// Start cropping `item`, whose source is `page`.
    ///
    /// The rectangle starts as the full item, even if the item is already cropped.
    pub fn begin(item: &CanvasItem, page: &AssetPage) -> Self {
        let item_bounds = item.bounds();
        Self {
            target: item.id(),
            item_bounds,
            rect: Rect::from_origin_size(Point::ZERO, item_bounds.size()),
            native_size: page.native_size(),
        }
    }

    pub fn target(&self) -> ItemId {
        self.target
    }

    /// Crop rectangle in item-local coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Crop rectangle in canvas coordinates, for drawing the overlay.
    pub fn canvas_rect(&self) -> Rect {
        self.rect + self.item_bounds.origin().to_vec2()
    }

    pub fn native_size(&self) -> Size {
        self.native_size
    }

    fn to_local(&self, point: Point) -> Point {
        point - self.item_bounds.origin().to_vec2()
    }

    /// Crop handle under a canvas-space point.
    pub fn handle_at(&self, point: Point) -> Option<Handle> {
        geometry::handle_at(self.canvas_rect(), point, CROP_HANDLE_HIT_RADIUS)
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::contains_point(self.canvas_rect(), point)
    }

    /// Start a crop gesture at a canvas-space point: handles take priority
    /// over the interior. Returns `None` outside the rectangle.
    pub fn begin_drag(&self, point: Point) -> Option<DragState> {
        let start = self.to_local(point);
        if let Some(handle) = self.handle_at(point) {
            return Some(DragState::CroppingResize {
                handle,
                start,
                original: self.rect,
            });
        }
        self.contains(point).then_some(DragState::CroppingMove {
            start,
            original: self.rect,
        })
    }

    /// Continue a crop gesture. Returns true if the rectangle changed.
    pub fn drag_to(&mut self, drag: &DragState, point: Point) -> bool {
        let local = self.to_local(point);
        match *drag {
            DragState::CroppingMove { start, original } => {
                self.rect = self.moved(original, local - start);
                true
            }
            DragState::CroppingResize {
                handle,
                start,
                original,
            } => match self.resized(original, handle, local - start) {
                Some(rect) => {
                    self.rect = rect;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn moved(&self, original: Rect, delta: Vec2) -> Rect {
        let bounds = self.item_bounds.size();
        let x = (original.x0 + delta.x)
            .min(bounds.width - original.width())
            .max(0.0);
        let y = (original.y0 + delta.y)
            .min(bounds.height - original.height())
            .max(0.0);
        Rect::from_origin_size(Point::new(x, y), original.size())
    }

    /// Free resize from a handle, clamped to the item. `None` if either
    /// dimension would fall below the minimum.
    fn resized(&self, original: Rect, handle: Handle, delta: Vec2) -> Option<Rect> {
        let bounds = self.item_bounds.size();
        let (mut x0, mut y0, mut x1, mut y1) = (original.x0, original.y0, original.x1, original.y1);

        if matches!(handle, Handle::NorthWest | Handle::SouthWest | Handle::West) {
            x0 = (original.x0 + delta.x).max(0.0);
        }
        if matches!(handle, Handle::NorthEast | Handle::SouthEast | Handle::East) {
            x1 = original.x0 + (original.width() + delta.x).min(bounds.width - original.x0);
        }
        if matches!(handle, Handle::NorthWest | Handle::NorthEast | Handle::North) {
            y0 = (original.y0 + delta.y).max(0.0);
        }
        if matches!(handle, Handle::SouthWest | Handle::SouthEast | Handle::South) {
            y1 = original.y0 + (original.height() + delta.y).min(bounds.height - original.y0);
        }

        let rect = Rect::new(x0, y0, x1, y1);
        (x1 - x0 >= MIN_SIZE && y1 - y0 >= MIN_SIZE).then_some(rect)
    }

    /// Map the local rectangle into native page pixels, clamped to the page.
    pub fn to_native(&self) -> CropRegion {
        let display = self.item_bounds.size();
        let scale_x = self.native_size.width / display.width;
        let scale_y = self.native_size.height / display.height;

        let x = (self.rect.x0 * scale_x).clamp(0.0, self.native_size.width);
        let y = (self.rect.y0 * scale_y).clamp(0.0, self.native_size.height);
        let width = (self.rect.width() * scale_x).min(self.native_size.width - x);
        let height = (self.rect.height() * scale_y).min(self.native_size.height - y);
        CropRegion::new(x, y, width, height)
    }

    /// Finish the session into a commit request for `item`.
    pub fn into_request(self, item: &CanvasItem) -> CropRequest {
        let region = self.to_native();
        CropRequest {
            item: self.target,
            region,
            aspect_ratio: region.aspect_ratio(),
            key: ImageKey::cropped(item.asset_id, item.page_index, region),
        }
    }
}

/// A crop commit awaiting its replacement image.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    pub item: ItemId,
    /// New source region, native page pixels.
    pub region: CropRegion,
    pub aspect_ratio: f64,
    /// Image to acquire before the crop applies.
    pub key: ImageKey,
}

/// Apply a crop whose image has been acquired.
///
/// Width is kept; height is re-fit to the new aspect ratio. A refit below the
/// minimum height grows the item back to it, keeping the aspect ratio.
pub fn apply_crop(item: &mut CanvasItem, request: &CropRequest, image: ImageHandle) {
    item.crop = Some(request.region);
    item.aspect_ratio = request.aspect_ratio;
    item.image = image;
    item.height = item.width / item.aspect_ratio;
    if item.height < MIN_SIZE {
        item.height = MIN_SIZE;
        item.width = MIN_SIZE * item.aspect_ratio;
    }
    if item.width < MIN_SIZE {
        item.width = MIN_SIZE;
        item.height = MIN_SIZE / item.aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetId, AssetKind};
    use crate::canvas::CanvasDocument;
    use crate::canvas::tests::page;

    fn setup() -> (CanvasItem, AssetPage) {
        let page = page(0, 800.0, 400.0);
        let mut doc = CanvasDocument::new();
        let id = doc.add_item(
            AssetId::new(),
            AssetKind::Pdf,
            &page,
            Point::new(100.0, 50.0),
            Size::new(200.0, 100.0),
        );
        (doc.get(id).unwrap().clone(), page)
    }

    fn assert_region(region: CropRegion, x: f64, y: f64, w: f64, h: f64) {
        assert!((region.x - x).abs() < 1e-9, "x: {}", region.x);
        assert!((region.y - y).abs() < 1e-9, "y: {}", region.y);
        assert!((region.width - w).abs() < 1e-9, "w: {}", region.width);
        assert!((region.height - h).abs() < 1e-9, "h: {}", region.height);
    }

    #[test]
    fn test_begin_covers_item() {
        let (item, page) = setup();
        let session = CropSession::begin(&item, &page);
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(session.canvas_rect(), item.bounds());
        assert_eq!(session.native_size(), Size::new(800.0, 400.0));
    }

    #[test]
    fn test_commit_maps_to_native() {
        let (mut item, page) = setup();
        let mut session = CropSession::begin(&item, &page);

        // Drag the west edge right by 50, then the east edge left by 50.
        let drag = session.begin_drag(Point::new(100.0, 100.0)).unwrap();
        assert!(matches!(drag, DragState::CroppingResize { handle: Handle::West, .. }));
        session.drag_to(&drag, Point::new(150.0, 100.0));
        let drag = session.begin_drag(Point::new(300.0, 100.0)).unwrap();
        session.drag_to(&drag, Point::new(250.0, 100.0));
        assert_eq!(session.rect(), Rect::new(50.0, 0.0, 150.0, 100.0));

        let request = session.into_request(&item);
        assert_region(request.region, 200.0, 0.0, 400.0, 400.0);
        assert!((request.aspect_ratio - 1.0).abs() < 1e-9);
        assert_eq!(request.key.crop, Some(request.region));

        apply_crop(&mut item, &request, ImageHandle::new("cropped"));
        assert_eq!(item.width, 200.0);
        assert!((item.height - 200.0).abs() < 1e-9);
        assert_eq!(item.image.as_str(), "cropped");
    }

    #[test]
    fn test_refit_keeps_minimum_height() {
        let (mut item, _) = setup();
        let region = CropRegion::new(0.0, 0.0, 800.0, 2.0);
        let request = CropRequest {
            item: item.id(),
            region,
            aspect_ratio: region.aspect_ratio(),
            key: ImageKey::cropped(item.asset_id, item.page_index, region),
        };

        // 200 wide at aspect 400 would be half a unit tall.
        apply_crop(&mut item, &request, ImageHandle::new("strip"));
        assert_eq!(item.height, MIN_SIZE);
        assert!((item.width - 8000.0).abs() < 1e-9);
        assert!((item.width / item.height - item.aspect_ratio).abs() < 1e-9);
    }

    #[test]
    fn test_move_is_clamped_to_item() {
        let (item, page) = setup();
        let mut session = CropSession::begin(&item, &page);

        // A full-size rectangle has nowhere to go.
        let drag = session.begin_drag(Point::new(260.0, 80.0)).unwrap();
        session.drag_to(&drag, Point::new(270.0, 90.0));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));

        // Shrink from the south-east corner, then drag far outside.
        let drag = session.begin_drag(Point::new(300.0, 150.0)).unwrap();
        session.drag_to(&drag, Point::new(240.0, 120.0));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 140.0, 70.0));

        let drag = session.begin_drag(Point::new(150.0, 80.0)).unwrap();
        assert!(matches!(drag, DragState::CroppingMove { .. }));
        session.drag_to(&drag, Point::new(900.0, 900.0));
        assert_eq!(session.rect(), Rect::new(60.0, 30.0, 200.0, 100.0));
        session.drag_to(&drag, Point::new(-900.0, -900.0));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 140.0, 70.0));
    }

    #[test]
    fn test_resize_is_clamped_to_item() {
        let (item, page) = setup();
        let mut session = CropSession::begin(&item, &page);
        let drag = session.begin_drag(Point::new(300.0, 150.0)).unwrap();
        session.drag_to(&drag, Point::new(400.0, 300.0));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));

        let drag = session.begin_drag(Point::new(100.0, 50.0)).unwrap();
        session.drag_to(&drag, Point::new(0.0, 0.0));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_resize_below_minimum_keeps_prior_rect() {
        let (item, page) = setup();
        let mut session = CropSession::begin(&item, &page);
        let drag = session.begin_drag(Point::new(200.0, 150.0)).unwrap();
        assert!(matches!(drag, DragState::CroppingResize { handle: Handle::South, .. }));

        assert!(session.drag_to(&drag, Point::new(200.0, 100.0)));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 50.0));

        assert!(!session.drag_to(&drag, Point::new(200.0, 65.0)));
        assert_eq!(session.rect(), Rect::new(0.0, 0.0, 200.0, 50.0));
    }

    #[test]
    fn test_begin_drag_outside_rect() {
        let (item, page) = setup();
        let session = CropSession::begin(&item, &page);
        assert!(session.begin_drag(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_native_region_stays_on_page() {
        let (item, page) = setup();
        let session = CropSession::begin(&item, &page);
        let region = session.to_native();
        assert!(region.fits_within(page.native_size()));
        assert_region(region, 0.0, 0.0, 800.0, 400.0);
    }
}
