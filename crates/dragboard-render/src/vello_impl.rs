//! Vello-based renderer implementation.

use crate::renderer::{GridStyle, RenderContext, Renderer, ShapeRenderer};
use dragboard_core::shapes::{Shape, ShapeStyle};
use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Grid lines closer than this on screen are thinned out.
const MIN_GRID_PIXELS: f64 = 6.0;
/// Padding between a selected shape and its highlight outline, in pixels.
const SELECTION_PADDING: f64 = 4.0;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Selection highlight color.
    selection_color: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Render a shape path with the given style.
    fn render_path(&mut self, path: &BezPath, style: &ShapeStyle, transform: Affine) {
        if let Some(fill_color) = style.fill() {
            self.scene
                .fill(Fill::NonZero, transform, fill_color, None, path);
        }
        if style.border_width > 0.0 {
            let stroke = Stroke::new(style.border_width);
            let outline = Self::screen_outline(path, transform);
            self.scene
                .stroke(&stroke, Affine::IDENTITY, style.border(), None, &outline);
        }
    }

    /// Map a scene path to screen space so strokes keep their pixel width.
    fn screen_outline(path: &BezPath, transform: Affine) -> BezPath {
        transform * path.clone()
    }

    /// Outline the screen-space bounds of a selected shape.
    fn render_selection_outline(&mut self, bounds: Rect, transform: Affine) {
        let screen = transform
            .transform_rect_bbox(bounds)
            .inflate(SELECTION_PADDING, SELECTION_PADDING);
        let stroke = Stroke::new(1.5).with_dashes(0.0, [4.0, 3.0]);
        self.scene.stroke(
            &stroke,
            Affine::IDENTITY,
            self.selection_color,
            None,
            &screen,
        );
    }

    /// Spacing actually drawn, doubled until lines are far enough apart.
    fn effective_spacing(spacing: f64, transform: Affine) -> f64 {
        let scale = transform.as_coeffs()[0].abs();
        let mut step = spacing;
        while step * scale < MIN_GRID_PIXELS {
            step *= 2.0;
        }
        step
    }

    /// Calculate grid bounds snapped to the spacing.
    fn grid_bounds(visible: Rect, spacing: f64) -> (f64, f64, f64, f64) {
        let start_x = (visible.x0 / spacing).floor() * spacing;
        let start_y = (visible.y0 / spacing).floor() * spacing;
        let end_x = (visible.x1 / spacing).ceil() * spacing;
        let end_y = (visible.y1 / spacing).ceil() * spacing;
        (start_x, start_y, end_x, end_y)
    }

    /// Render full grid lines (hairlines in screen space).
    fn render_grid_lines(&mut self, visible: Rect, transform: Affine, spacing: f64) {
        let grid_color = Color::from_rgba8(255, 255, 255, 40);
        let axis_color = Color::from_rgba8(255, 255, 255, 90);
        let stroke = Stroke::new(1.0);
        let (start_x, start_y, end_x, end_y) = Self::grid_bounds(visible, spacing);

        let mut x = start_x;
        while x <= end_x {
            let line = Line::new(
                transform * Point::new(x, start_y),
                transform * Point::new(x, end_y),
            );
            let color = if x.abs() < spacing / 2.0 { axis_color } else { grid_color };
            self.scene.stroke(&stroke, Affine::IDENTITY, color, None, &line);
            x += spacing;
        }

        let mut y = start_y;
        while y <= end_y {
            let line = Line::new(
                transform * Point::new(start_x, y),
                transform * Point::new(end_x, y),
            );
            let color = if y.abs() < spacing / 2.0 { axis_color } else { grid_color };
            self.scene.stroke(&stroke, Affine::IDENTITY, color, None, &line);
            y += spacing;
        }
    }

    /// Render grid as dots at intersections, batched into one path.
    fn render_grid_dots(&mut self, visible: Rect, transform: Affine, spacing: f64) {
        let grid_color = Color::from_rgba8(255, 255, 255, 70);
        let (start_x, start_y, end_x, end_y) = Self::grid_bounds(visible, spacing);

        let mut dots = BezPath::new();
        let mut x = start_x;
        while x <= end_x {
            let mut y = start_y;
            while y <= end_y {
                let center = transform * Point::new(x, y);
                dots.extend(kurbo::Shape::path_elements(&Circle::new(center, 1.0), 0.1));
                y += spacing;
            }
            x += spacing;
        }
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, grid_color, None, &dots);
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.selection_color = ctx.selection_color;

        let camera = &ctx.canvas.camera;
        let camera_transform = camera.transform();

        if ctx.grid_style != GridStyle::None {
            let visible = camera.visible_rect(ctx.viewport_size);
            self.render_grid(visible, camera_transform, ctx.grid_spacing, ctx.grid_style);
        }

        // Draw all shapes in insertion order
        for shape in ctx.canvas.document.shapes_ordered() {
            let is_selected = ctx.selected == Some(shape.id());
            self.render_shape(shape, camera_transform, is_selected);
        }
    }
}

impl ShapeRenderer for VelloRenderer {
    fn render_shape(&mut self, shape: &Shape, transform: Affine, selected: bool) {
        let path = shape.to_path();
        self.render_path(&path, shape.style(), transform);

        if selected {
            self.render_selection_outline(shape.bounds(), transform);
        }
    }

    fn render_grid(&mut self, visible: Rect, transform: Affine, spacing: f64, style: GridStyle) {
        if spacing <= 0.0 {
            return;
        }
        let spacing = Self::effective_spacing(spacing, transform);
        match style {
            GridStyle::None => {}
            GridStyle::Lines => self.render_grid_lines(visible, transform, spacing),
            GridStyle::Dots => self.render_grid_dots(visible, transform, spacing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragboard_core::canvas::Canvas;
    use kurbo::Size;

    #[test]
    fn test_renderer_creation() {
        let mut renderer = VelloRenderer::new();
        assert!(renderer.take_scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_scene_without_grid() {
        let mut renderer = VelloRenderer::new();
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0)).with_grid(GridStyle::None);

        renderer.build_scene(&ctx);
        assert!(renderer.take_scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_shapes() {
        let mut renderer = VelloRenderer::new();
        let mut canvas = Canvas::new();
        let id = canvas.add_circle(Point::new(100.0, 100.0), 20.0);
        canvas.add_polygon(vec![
            Point::new(30.0, 30.0),
            Point::new(50.0, 60.0),
            Point::new(70.0, 30.0),
        ]);

        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0))
            .with_grid(GridStyle::None)
            .with_selected(Some(id));
        renderer.build_scene(&ctx);

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.take_scene().encoding().is_empty());
    }

    #[test]
    fn test_border_outline_follows_camera_in_pixels() {
        let mut canvas = Canvas::new();
        canvas.set_viewport_size(800.0, 900.0);
        canvas.look_at(Rect::new(-100.0, -100.0, 100.0, 100.0));
        let id = canvas.add_circle(Point::ZERO, 20.0);
        let transform = canvas.camera.transform();

        let shape = canvas.document.get_shape(id).unwrap();
        let outline = VelloRenderer::screen_outline(&shape.to_path(), transform);
        let bounds = kurbo::Shape::bounding_box(&outline);

        // Zoom 4 puts the origin at the viewport center and the radius at 80px
        assert!((bounds.center().x - 400.0).abs() < 0.5);
        assert!((bounds.center().y - 450.0).abs() < 0.5);
        assert!((bounds.width() - 160.0).abs() < 0.5);
        assert!((shape.style().border_width - 1.0).abs() < f64::EPSILON);

        let mut renderer = VelloRenderer::new();
        let ctx = RenderContext::new(&canvas, canvas.viewport_size).with_grid(GridStyle::None);
        renderer.build_scene(&ctx);
        assert!(!renderer.take_scene().encoding().is_empty());
    }

    #[test]
    fn test_grid_spacing_thins_out_when_zoomed_out() {
        let transform = Affine::scale(0.5);
        // 10 units at half scale is 5px, so one doubling gives 10px
        assert!((VelloRenderer::effective_spacing(10.0, transform) - 20.0).abs() < f64::EPSILON);
        assert!((VelloRenderer::effective_spacing(10.0, Affine::scale(4.0)) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_bounds_snap_outward() {
        let (x0, y0, x1, y1) =
            VelloRenderer::grid_bounds(Rect::new(-15.0, -5.0, 25.0, 35.0), 10.0);
        assert_eq!((x0, y0, x1, y1), (-20.0, -10.0, 30.0, 40.0));
    }
}
