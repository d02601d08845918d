//! Rectangle, handle and rotation math shared by the interaction engines.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum edge length, in canvas units, of an item or a crop rectangle.
pub const MIN_SIZE: f64 = 20.0;
/// Hit radius around an item resize handle, in canvas units.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
/// Hit radius around a crop handle, in canvas units.
pub const CROP_HANDLE_HIT_RADIUS: f64 = 10.0;

/// One of the eight resize anchors on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "n")]
    North,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "sw")]
    SouthWest,
    #[serde(rename = "w")]
    West,
}

impl Handle {
    /// All handles, in hit-test order.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::East,
        Handle::SouthEast,
        Handle::South,
        Handle::SouthWest,
        Handle::West,
    ];

    /// Relative anchor of the handle inside a rectangle (0 = left/top, 1 = right/bottom).
    pub fn anchor(self) -> (f64, f64) {
        match self {
            Handle::NorthWest => (0.0, 0.0),
            Handle::North => (0.5, 0.0),
            Handle::NorthEast => (1.0, 0.0),
            Handle::East => (1.0, 0.5),
            Handle::SouthEast => (1.0, 1.0),
            Handle::South => (0.5, 1.0),
            Handle::SouthWest => (0.0, 1.0),
            Handle::West => (0.0, 0.5),
        }
    }

    /// Position of this handle on `rect`.
    pub fn position(self, rect: Rect) -> Point {
        let (fx, fy) = self.anchor();
        Point::new(rect.x0 + rect.width() * fx, rect.y0 + rect.height() * fy)
    }

    /// CSS-style cursor name for this handle.
    pub fn cursor_name(self) -> &'static str {
        match self {
            Handle::NorthWest => "nw-resize",
            Handle::North => "n-resize",
            Handle::NorthEast => "ne-resize",
            Handle::East => "e-resize",
            Handle::SouthEast => "se-resize",
            Handle::South => "s-resize",
            Handle::SouthWest => "sw-resize",
            Handle::West => "w-resize",
        }
    }
}

/// Inclusive point-in-rectangle test (edges count as inside).
pub fn contains_point(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Find the first handle of `rect` within `radius` of `point`.
pub fn handle_at(rect: Rect, point: Point, radius: f64) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|handle| distance(handle.position(rect), point) <= radius)
}

/// Union of a set of rectangles, or `None` when the set is empty.
pub fn union_bounds(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().reduce(|acc, rect| acc.union(rect))
}

/// Resize `original` by dragging `handle` by `delta`, preserving `aspect_ratio`.
///
/// Corner handles and the east/west edges derive the width from `delta.x`;
/// the north/south edges derive the height from `delta.y`. The other
/// dimension always follows from the aspect ratio. The edge or corner
/// opposite the dragged handle stays fixed; edge handles re-center the
/// perpendicular axis. Both dimensions are clamped to [`MIN_SIZE`].
pub fn resize_preserving_aspect(
    original: Rect,
    handle: Handle,
    delta: Vec2,
    aspect_ratio: f64,
) -> Rect {
    let (ox, oy) = (original.x0, original.y0);
    let (ow, oh) = (original.width(), original.height());

    let (mut width, mut height) = match handle {
        Handle::NorthWest | Handle::SouthWest | Handle::West => {
            let width = ow - delta.x;
            (width, width / aspect_ratio)
        }
        Handle::NorthEast | Handle::SouthEast | Handle::East => {
            let width = ow + delta.x;
            (width, width / aspect_ratio)
        }
        Handle::North => {
            let height = oh - delta.y;
            (height * aspect_ratio, height)
        }
        Handle::South => {
            let height = oh + delta.y;
            (height * aspect_ratio, height)
        }
    };

    if width < MIN_SIZE {
        width = MIN_SIZE;
        height = MIN_SIZE / aspect_ratio;
    }
    if height < MIN_SIZE {
        height = MIN_SIZE;
        width = MIN_SIZE * aspect_ratio;
    }

    let x = match handle {
        Handle::NorthWest | Handle::SouthWest | Handle::West => ox + ow - width,
        Handle::NorthEast | Handle::SouthEast | Handle::East => ox,
        Handle::North | Handle::South => ox + (ow - width) / 2.0,
    };
    let y = match handle {
        Handle::NorthWest | Handle::NorthEast | Handle::North => oy + oh - height,
        Handle::SouthWest | Handle::SouthEast | Handle::South => oy,
        Handle::East | Handle::West => oy + (oh - height) / 2.0,
    };

    Rect::new(x, y, x + width, y + height)
}

/// Rotation of an item in fixed quarter-turn steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// A rotation angle that is not a multiple of 90 in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported rotation: {0} degrees")]
pub struct InvalidRotation(pub u16);

impl Rotation {
    /// Advance by +90 degrees, wrapping at 360.
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Angle in radians.
    pub fn radians(self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Transform that rotates `rect` about its own center.
    ///
    /// Rotation is visual only; hit-testing and export use the unrotated rectangle.
    pub fn transform_about(self, rect: Rect) -> Affine {
        if self == Rotation::Deg0 {
            return Affine::IDENTITY;
        }
        let center = rect.center().to_vec2();
        Affine::translate(center) * Affine::rotate(self.radians()) * Affine::translate(-center)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(InvalidRotation(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect(rect: Rect, x: f64, y: f64, w: f64, h: f64) {
        assert!((rect.x0 - x).abs() < 1e-9, "x: {} != {}", rect.x0, x);
        assert!((rect.y0 - y).abs() < 1e-9, "y: {} != {}", rect.y0, y);
        assert!((rect.width() - w).abs() < 1e-9, "w: {} != {}", rect.width(), w);
        assert!((rect.height() - h).abs() < 1e-9, "h: {} != {}", rect.height(), h);
    }

    #[test]
    fn test_handle_positions() {
        let rect = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(Handle::NorthWest.position(rect), Point::new(10.0, 20.0));
        assert_eq!(Handle::North.position(rect), Point::new(60.0, 20.0));
        assert_eq!(Handle::East.position(rect), Point::new(110.0, 45.0));
        assert_eq!(Handle::SouthEast.position(rect), Point::new(110.0, 70.0));
        assert_eq!(Handle::West.position(rect), Point::new(10.0, 45.0));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(contains_point(rect, Point::new(100.0, 50.0)));
        assert!(contains_point(rect, Point::new(0.0, 0.0)));
        assert!(!contains_point(rect, Point::new(100.1, 25.0)));
    }

    #[test]
    fn test_handle_hit_radius() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let item_hit = |x, y| handle_at(rect, Point::new(x, y), HANDLE_HIT_RADIUS);
        assert_eq!(item_hit(105.0, 55.0), Some(Handle::SouthEast));
        assert_eq!(item_hit(110.0, 60.0), None);
        assert_eq!(item_hit(57.0, -3.0), Some(Handle::North));
        assert_eq!(
            handle_at(rect, Point::new(56.0, 6.0), CROP_HANDLE_HIT_RADIUS),
            Some(Handle::North)
        );
    }

    #[test]
    fn test_resize_southeast() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let resized =
            resize_preserving_aspect(original, Handle::SouthEast, Vec2::new(50.0, 0.0), 2.0);
        assert_rect(resized, 0.0, 0.0, 150.0, 75.0);
    }

    #[test]
    fn test_resize_northwest_keeps_opposite_corner() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let resized =
            resize_preserving_aspect(original, Handle::NorthWest, Vec2::new(20.0, 0.0), 2.0);
        assert_rect(resized, 20.0, 10.0, 80.0, 40.0);
        assert!((resized.x1 - 100.0).abs() < 1e-9);
        assert!((resized.y1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_edges_recenter() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);

        // Top edge: bottom fixed, horizontally re-centered.
        let top = resize_preserving_aspect(original, Handle::North, Vec2::new(0.0, -10.0), 2.0);
        assert_rect(top, -10.0, -10.0, 120.0, 60.0);

        // Right edge: left fixed, vertically re-centered.
        let right = resize_preserving_aspect(original, Handle::East, Vec2::new(20.0, 0.0), 2.0);
        assert_rect(right, 0.0, -5.0, 120.0, 60.0);
    }

    #[test]
    fn test_resize_all_handles_preserve_aspect_and_minimum() {
        let original = Rect::new(50.0, 50.0, 150.0, 100.0);
        let deltas = [
            Vec2::new(35.0, -12.0),
            Vec2::new(-400.0, 400.0),
            Vec2::new(400.0, -400.0),
            Vec2::new(-7.5, 3.25),
        ];
        for handle in Handle::ALL {
            for delta in deltas {
                let resized = resize_preserving_aspect(original, handle, delta, 2.0);
                assert!((resized.width() / resized.height() - 2.0).abs() < 1e-9);
                assert!(resized.width() >= MIN_SIZE - 1e-9);
                assert!(resized.height() >= MIN_SIZE - 1e-9);
            }
        }
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let original = Rect::new(0.0, 0.0, 100.0, 50.0);
        let resized =
            resize_preserving_aspect(original, Handle::SouthEast, Vec2::new(-95.0, 0.0), 2.0);
        assert_rect(resized, 0.0, 0.0, 40.0, 20.0);

        let tall = Rect::new(0.0, 0.0, 50.0, 100.0);
        let resized = resize_preserving_aspect(tall, Handle::South, Vec2::new(0.0, -95.0), 0.5);
        assert!((resized.width() - MIN_SIZE).abs() < 1e-9);
        assert!((resized.height() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_cycle() {
        let mut rotation = Rotation::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(rotation.degrees());
            rotation = rotation.next();
        }
        assert_eq!(seen, vec![0, 90, 180, 270, 0]);
        assert!(Rotation::try_from(45).is_err());
        assert_eq!(Rotation::try_from(180), Ok(Rotation::Deg180));
    }

    #[test]
    fn test_rotation_about_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let affine = Rotation::Deg180.transform_about(rect);
        let p = affine * Point::new(0.0, 0.0);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);
        assert_eq!(Rotation::Deg0.transform_about(rect), Affine::IDENTITY);
    }

    #[test]
    fn test_union_bounds() {
        assert!(union_bounds(Vec::new()).is_none());
        let union =
            union_bounds([Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, -5.0, 30.0, 5.0)])
                .unwrap();
        assert_eq!(union, Rect::new(0.0, -5.0, 30.0, 10.0));
    }
}
