//! Canvas document and state management.

use crate::camera::Camera;
use crate::shapes::{Circle, Polygon, Shape, ShapeId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Scene document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid scene file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Inconsistent scene file: {0}")]
    Invalid(String),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// A canvas document containing all shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Draw order of shapes (back to front, i.e. insertion order).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene the canvas demo starts with: a circle of radius 20 at the
    /// origin and a triangle to its upper right.
    pub fn demo() -> Self {
        let mut doc = Self::new();
        doc.add_circle(Point::ZERO, 20.0);
        doc.add_polygon(vec![
            Point::new(30.0, 30.0),
            Point::new(50.0, 60.0),
            Point::new(70.0, 30.0),
        ]);
        doc
    }

    /// Add a shape to the document, on top of all existing shapes.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Add a filled circle.
    pub fn add_circle(&mut self, center: Point, radius: f64) -> ShapeId {
        self.add_shape(Circle::new(center, radius).into())
    }

    /// Add a filled polygon.
    pub fn add_polygon(&mut self, vertices: Vec<Point>) -> ShapeId {
        self.add_shape(Polygon::new(vertices).into())
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in draw order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Front-most shape under a point (in scene coordinates), if any.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.shapes
                .get(id)
                .is_some_and(|s| s.hit_test(point, tolerance))
        })
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(Shape::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON, rejecting files whose draw order
    /// does not match the shape map.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Every shape is keyed by its own id and listed exactly once in `z_order`.
    fn validate(&self) -> DocumentResult<()> {
        for (key, shape) in &self.shapes {
            if *key != shape.id() {
                return Err(DocumentError::Invalid(format!(
                    "shape {} is stored under key {key}",
                    shape.id()
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.z_order.len());
        for id in &self.z_order {
            if !seen.insert(*id) {
                return Err(DocumentError::Invalid(format!(
                    "shape {id} appears more than once in z_order"
                )));
            }
            if !self.shapes.contains_key(id) {
                return Err(DocumentError::Invalid(format!(
                    "z_order lists unknown shape {id}"
                )));
            }
        }

        if let Some(id) = self.shapes.keys().find(|id| !seen.contains(*id)) {
            return Err(DocumentError::Invalid(format!(
                "shape {id} is missing from z_order"
            )));
        }
        Ok(())
    }

    /// Load a document from a scene file.
    pub fn load(path: impl AsRef<Path>) -> DocumentResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let doc = Self::from_json(&json)?;
        log::info!("Loaded {} shapes from {}", doc.len(), path.display());
        Ok(doc)
    }
}

/// Runtime canvas state (not persisted).
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being shown.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Whether pointer drags pan the camera.
    pub pan_enabled: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_document(CanvasDocument::new())
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self {
            document,
            camera: Camera::new(),
            viewport_size: Size::new(800.0, 600.0),
            pan_enabled: false,
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Frame a scene rectangle in the current viewport, scene y pointing up.
    pub fn look_at(&mut self, rect: Rect) {
        self.camera = Camera::looking_at(rect, self.viewport_size);
    }

    /// Add a filled circle.
    pub fn add_circle(&mut self, center: Point, radius: f64) -> ShapeId {
        self.document.add_circle(center, radius)
    }

    /// Add a filled polygon.
    pub fn add_polygon(&mut self, vertices: Vec<Point>) -> ShapeId {
        self.document.add_polygon(vertices)
    }
}
