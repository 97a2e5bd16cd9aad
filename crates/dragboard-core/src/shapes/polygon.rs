//! Closed polygon shape.

use super::{SerializableColor, ShapeId, ShapeStyle, ShapeTrait, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default polygon fill (blue).
pub const POLYGON_FILL: SerializableColor = SerializableColor {
    r: 0x34,
    g: 0xa8,
    b: 0xe8,
    a: 255,
};

/// A closed polygon (ordered vertices, last connects back to first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub vertices: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a new filled polygon from its vertices.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices,
            style: ShapeStyle::filled(POLYGON_FILL),
        }
    }

    /// Iterate the closed outline's edges.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.vertices.first() else {
            return Rect::ZERO;
        };
        self.vertices
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        if self.style.fill_color.is_some()
            && self.vertices.len() >= 3
            && self.to_path().winding(point) != 0
        {
            return true;
        }
        let reach = tolerance + self.style.half_border();
        self.edges()
            .any(|(a, b)| point_to_segment_dist(point, a, b) <= reach)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.vertices.iter();
        if let Some(first) = points.next() {
            path.move_to(*first);
            for p in points {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Point::new(30.0, 30.0),
            Point::new(50.0, 60.0),
            Point::new(70.0, 30.0),
        ])
    }

    #[test]
    fn test_bounds() {
        let bounds = triangle().bounds();
        assert_eq!(bounds, Rect::new(30.0, 30.0, 70.0, 60.0));
        assert_eq!(Polygon::new(Vec::new()).bounds(), Rect::ZERO);
    }

    #[test]
    fn test_hit_test_inside() {
        let poly = triangle();
        assert!(poly.hit_test(Point::new(50.0, 40.0), 0.0));
        assert!(!poly.hit_test(Point::new(35.0, 55.0), 0.0));
        assert!(!poly.hit_test(Point::new(0.0, 0.0), 2.0));
    }

    #[test]
    fn test_hit_test_edge_tolerance() {
        let mut poly = triangle();
        poly.style.fill_color = None;
        // Interior misses without fill
        assert!(!poly.hit_test(Point::new(50.0, 40.0), 0.0));
        // Just below the bottom edge
        assert!(poly.hit_test(Point::new(50.0, 28.0), 2.0));
    }

    #[test]
    fn test_translate_moves_every_vertex() {
        let mut poly = triangle();
        poly.translate(Vec2::new(-10.0, 5.0));
        assert_eq!(
            poly.vertices,
            vec![
                Point::new(20.0, 35.0),
                Point::new(40.0, 65.0),
                Point::new(60.0, 35.0),
            ]
        );
    }

    #[test]
    fn test_path_is_closed() {
        let path = triangle().to_path();
        assert!(matches!(path.elements().last(), Some(kurbo::PathEl::ClosePath)));
    }
}
