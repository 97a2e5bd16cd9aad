//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and scene coordinates. With
/// `y_up` set, scene y grows upward while screen y grows downward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (screen pixels per scene unit).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Flip the y axis so scene y points up.
    #[serde(default)]
    pub y_up: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 50.0,
            y_up: false,
        }
    }
}

impl Camera {
    /// Create an identity camera (scene = screen).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a y-up camera framing `rect` inside `viewport` with equal
    /// horizontal and vertical scale.
    pub fn looking_at(rect: Rect, viewport: Size) -> Self {
        let mut camera = Self {
            y_up: true,
            ..Self::default()
        };
        camera.fit_to_bounds(rect, viewport, 0.0);
        camera
    }

    fn scale(&self) -> Affine {
        let sy = if self.y_up { -self.zoom } else { self.zoom };
        Affine::scale_non_uniform(self.zoom, sy)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts scene coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * self.scale()
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to scene coordinates.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    /// Convert a screen point to scene coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a scene point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// Reset pan and zoom, keeping the axis orientation.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the camera to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded_viewport.width / bounds.width();
        let scale_y = padded_viewport.height / bounds.height();
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        // Center the bounds in the viewport
        let scaled_center = self.scale() * bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.offset = viewport_center - scaled_center;
    }

    /// Scene rectangle currently visible in a viewport of the given size.
    pub fn visible_rect(&self, viewport: Size) -> Rect {
        let a = self.screen_to_world(Point::ZERO);
        let b = self.screen_to_world(Point::new(viewport.width, viewport.height));
        Rect::from_points(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
        assert!(!camera.y_up);
    }

    #[test]
    fn test_screen_to_world_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let world = camera.screen_to_world(screen);
        assert!((world.x - screen.x).abs() < f64::EPSILON);
        assert!((world.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < 1e-9);
        assert!((world.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < 1e-9);
        assert!((world.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_y_up_flips_vertical_axis() {
        let mut camera = Camera::new();
        camera.y_up = true;
        camera.offset = Vec2::new(0.0, 100.0);
        // Screen row 0 is the top of the view, which is scene y = 100
        let world = camera.screen_to_world(Point::new(0.0, 0.0));
        assert!((world.y - 100.0).abs() < 1e-9);
        let world = camera.screen_to_world(Point::new(0.0, 100.0));
        assert!(world.y.abs() < 1e-9);
    }

    #[test]
    fn test_looking_at_frames_rect() {
        let camera = Camera::looking_at(
            Rect::new(-100.0, -100.0, 100.0, 100.0),
            Size::new(800.0, 900.0),
        );
        assert!((camera.zoom - 4.0).abs() < 1e-9);

        // Scene origin lands in the middle of the viewport
        let center = camera.world_to_screen(Point::ZERO);
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 450.0).abs() < 1e-9);

        // Scene top-left corner is up and to the left on screen
        let top_left = camera.world_to_screen(Point::new(-100.0, 100.0));
        assert!((top_left.x - 0.0).abs() < 1e-9);
        assert!((top_left.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;
        camera.y_up = true;

        let original = Point::new(123.0, 456.0);
        let world = camera.screen_to_world(original);
        let back = camera.world_to_screen(world);

        assert!((back.x - original.x).abs() < 1e-9);
        assert!((back.y - original.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut camera = Camera::looking_at(
            Rect::new(-100.0, -100.0, 100.0, 100.0),
            Size::new(400.0, 400.0),
        );
        let anchor = Point::new(120.0, 80.0);
        let before = camera.screen_to_world(anchor);
        camera.zoom_at(anchor, 1.25);
        let after = camera.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
