//! Zoom, pan and device-pixel mapping between the screen and the canvas.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom is stored in tenths so that "exactly 1" is well defined.
const STEPS_PER_UNIT: u32 = 10;
const MIN_ZOOM_STEPS: u32 = 1;
const MAX_ZOOM_STEPS: u32 = 50;

/// View transform for the canvas.
///
/// The canvas is first fitted into the container (never enlarged), then
/// multiplied by the user zoom. Panning is only possible while zoomed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    canvas_size: Size,
    container_size: Size,
    device_pixel_ratio: f64,
    /// Screen position of the canvas top-left corner before panning.
    canvas_origin: Point,
    zoom_steps: u32,
    pan_offset: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(Size::new(595.0, 842.0), Size::new(1200.0, 900.0), 1.0)
    }
}

impl ViewTransform {
    pub fn new(canvas_size: Size, container_size: Size, device_pixel_ratio: f64) -> Self {
        Self {
            canvas_size,
            container_size,
            device_pixel_ratio,
            canvas_origin: Point::ZERO,
            zoom_steps: STEPS_PER_UNIT,
            pan_offset: Vec2::ZERO,
        }
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    pub fn set_container_size(&mut self, size: Size) {
        self.container_size = size;
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    /// User zoom level in `[0.1, 5]`.
    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_steps) / f64::from(STEPS_PER_UNIT)
    }

    /// Zoom level as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        self.zoom_steps * (100 / STEPS_PER_UNIT)
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.zoom_steps > STEPS_PER_UNIT
    }

    /// Scale that fits the canvas into the container, at most 1.
    pub fn fit_scale(&self) -> f64 {
        let scale_x = self.container_size.width / self.canvas_size.width;
        let scale_y = self.container_size.height / self.canvas_size.height;
        scale_x.min(scale_y).min(1.0)
    }

    /// Canvas units to CSS pixels.
    pub fn scale(&self) -> f64 {
        self.fit_scale() * self.zoom()
    }

    /// Change the zoom by whole 0.1 steps, clamped. Returns true if it changed.
    ///
    /// Returning to exactly 1 resets the pan offset.
    pub fn zoom_by(&mut self, steps: i32) -> bool {
        let target = (i64::from(self.zoom_steps) + i64::from(steps))
            .clamp(i64::from(MIN_ZOOM_STEPS), i64::from(MAX_ZOOM_STEPS)) as u32;
        if target == self.zoom_steps {
            return false;
        }
        self.zoom_steps = target;
        if self.zoom_steps == STEPS_PER_UNIT {
            self.pan_offset = Vec2::ZERO;
        }
        log::debug!("Zoom {}%", self.zoom_percent());
        true
    }

    /// One wheel notch: scrolling down zooms out, up zooms in.
    pub fn zoom_wheel(&mut self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.zoom_by(-1)
        } else if delta_y < 0.0 {
            self.zoom_by(1)
        } else {
            false
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(1)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(-1)
    }

    /// Back to 100% with no pan.
    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.zoom_steps != STEPS_PER_UNIT || self.pan_offset != Vec2::ZERO;
        self.zoom_steps = STEPS_PER_UNIT;
        self.pan_offset = Vec2::ZERO;
        changed
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    /// Set the pan offset (screen pixels). Ignored unless zoomed in.
    pub fn set_pan_offset(&mut self, offset: Vec2) -> bool {
        if !self.is_zoomed_in() {
            return false;
        }
        self.pan_offset = offset;
        true
    }

    /// Canvas to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.canvas_origin.to_vec2() + self.pan_offset)
            * Affine::scale(self.scale())
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        let origin = self.canvas_origin + self.pan_offset;
        let scale = self.scale();
        Point::new(
            (screen_point.x - origin.x) / scale,
            (screen_point.y - origin.y) / scale,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pixel size of the backing store: canvas size times device pixel ratio.
    pub fn backing_size(&self) -> Size {
        self.canvas_size * self.device_pixel_ratio
    }

    /// On-screen size of the canvas in CSS pixels.
    pub fn display_size(&self) -> Size {
        self.canvas_size * self.scale()
    }

    /// Transform the renderer applies to draw canvas units into the backing store.
    pub fn render_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewTransform {
        // Container half the canvas size: fit scale 0.5.
        ViewTransform::new(Size::new(600.0, 800.0), Size::new(300.0, 400.0), 2.0)
    }

    #[test]
    fn test_default_view() {
        let view = ViewTransform::default();
        assert_eq!(view.zoom_percent(), 100);
        assert_eq!(view.pan_offset(), Vec2::ZERO);
        assert!((view.fit_scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_scale_never_enlarges() {
        let view = ViewTransform::new(Size::new(100.0, 100.0), Size::new(1000.0, 500.0), 1.0);
        assert!((view.scale() - 1.0).abs() < f64::EPSILON);
        assert!((self::view().fit_scale() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas() {
        let mut view = view();
        view.set_canvas_origin(Point::new(20.0, 10.0));
        let canvas = view.screen_to_canvas(Point::new(120.0, 60.0));
        assert!((canvas.x - 200.0).abs() < 1e-10);
        assert!((canvas.y - 100.0).abs() < 1e-10);

        let back = view.canvas_to_screen(canvas);
        assert!((back.x - 120.0).abs() < 1e-10);
        assert!((back.y - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut view = view();
        for _ in 0..100 {
            view.zoom_out();
        }
        assert_eq!(view.zoom_percent(), 10);
        assert!(!view.zoom_out());

        for _ in 0..100 {
            view.zoom_wheel(-1.0);
        }
        assert_eq!(view.zoom_percent(), 500);
        assert!((view.zoom() - 5.0).abs() < f64::EPSILON);
        assert!(!view.zoom_wheel(-3.0));
    }

    #[test]
    fn test_pan_only_when_zoomed_in() {
        let mut view = view();
        assert!(!view.set_pan_offset(Vec2::new(10.0, 10.0)));

        view.zoom_in();
        assert!(view.set_pan_offset(Vec2::new(10.0, 10.0)));
        assert_eq!(view.pan_offset(), Vec2::new(10.0, 10.0));

        // Pan shifts the canvas on screen.
        let canvas = view.screen_to_canvas(Point::new(10.0, 10.0));
        assert!(canvas.x.abs() < 1e-10 && canvas.y.abs() < 1e-10);

        // Back at exactly 1: pan resets.
        view.zoom_out();
        assert_eq!(view.zoom_percent(), 100);
        assert_eq!(view.pan_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_zoomed_out_keeps_pan_reset() {
        let mut view = view();
        view.zoom_wheel(1.0);
        assert_eq!(view.zoom_percent(), 90);
        assert!(!view.set_pan_offset(Vec2::new(5.0, 0.0)));
        assert!(view.reset_zoom());
        assert!(!view.reset_zoom());
    }

    #[test]
    fn test_device_pixel_ratio() {
        let mut view = view();
        view.zoom_by(10);
        assert_eq!(view.backing_size(), Size::new(1200.0, 1600.0));
        assert_eq!(view.display_size(), Size::new(600.0, 800.0));
        assert_eq!(view.render_transform(), Affine::scale(2.0));
    }
}
