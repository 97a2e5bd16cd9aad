//! Circle shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default circle fill (orange).
pub const CIRCLE_FILL: SerializableColor = SerializableColor {
    r: 0xe8,
    g: 0x88,
    b: 0x34,
    a: 255,
};

/// A circle shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new filled circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::filled(CIRCLE_FILL),
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_bw = self.style.half_border();
        let dist = (point - self.center).hypot();
        if dist > self.radius + tolerance + half_bw {
            return false;
        }
        if self.style.fill_color.is_some() {
            return true;
        }
        // Outline only: reject points well inside the ring
        dist >= (self.radius - tolerance - half_bw).max(0.0)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_creation() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        assert!((circle.center.x - 50.0).abs() < f64::EPSILON);
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
        assert_eq!(circle.style.fill_color, Some(CIRCLE_FILL));
    }

    #[test]
    fn test_hit_test_center() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0);
        assert!(circle.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_hit_test_edge() {
        let circle = Circle::new(Point::ZERO, 10.0);
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(15.0, 0.0), 5.0));
    }

    #[test]
    fn test_outline_hit_test() {
        let mut circle = Circle::new(Point::ZERO, 10.0);
        circle.style.fill_color = None;
        assert!(!circle.hit_test(Point::ZERO, 1.0));
        assert!(circle.hit_test(Point::new(0.0, 9.5), 1.0));
    }

    #[test]
    fn test_translate() {
        let mut circle = Circle::new(Point::new(1.0, 1.0), 5.0);
        circle.translate(Vec2::new(2.0, -3.0));
        assert_eq!(circle.center, Point::new(3.0, -2.0));
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 20.0);
        let bounds = circle.bounds();
        assert!((bounds.x0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 70.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
