//! Renderer trait abstraction.

use dragboard_core::canvas::Canvas;
use dragboard_core::shapes::{Shape, ShapeId};
use kurbo::{Affine, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid.
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only intersection dots.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Grid spacing in scene units.
    pub grid_spacing: f64,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Shape currently being dragged, drawn with a highlight.
    pub selected: Option<ShapeId>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            grid_style: GridStyle::Lines,
            grid_spacing: 10.0,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            selected: None,
        }
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    /// Set the selected shape.
    pub fn with_selected(mut self, selected: Option<ShapeId>) -> Self {
        self.selected = selected;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);
}

/// Helper trait for shape rendering (used internally by renderers).
pub trait ShapeRenderer {
    /// Render a shape with the given transform.
    fn render_shape(&mut self, shape: &Shape, transform: Affine, selected: bool);

    /// Render a grid pattern over the visible scene rectangle.
    fn render_grid(&mut self, visible: Rect, transform: Affine, spacing: f64, style: GridStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_style_cycles() {
        let mut style = GridStyle::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(style.name());
            style = style.next();
        }
        assert_eq!(style, GridStyle::default());
        assert_eq!(seen, ["Lines", "Dots", "None"]);
    }

    #[test]
    fn test_context_builders() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(10.0, 10.0))
            .with_grid(GridStyle::None);
        assert_eq!(ctx.grid_style, GridStyle::None);
        assert!(ctx.selected.is_none());
        assert!((ctx.grid_spacing - 10.0).abs() < f64::EPSILON);
    }
}
