//! Pointer event handling for the canvas demo.

use dragboard_core::canvas::Canvas;
use dragboard_core::input::{InputState, MouseButton, PointerEvent};
use dragboard_core::interaction::DragState;
use dragboard_core::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};

/// Text shown in the status label before the first pointer action.
pub const INITIAL_STATUS: &str = "Mouse actions will appear here.";

/// Zoom factor applied per wheel line.
const WHEEL_ZOOM_STEP: f64 = 1.1;
/// Pixel scroll distance treated as one wheel line.
const PIXELS_PER_LINE: f64 = 50.0;

/// Convert a winit mouse button to the core button, if the demo handles it.
pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Convert a winit wheel delta into wheel lines (positive zooms in).
pub fn wheel_lines(delta: winit::event::MouseScrollDelta) -> f64 {
    match delta {
        winit::event::MouseScrollDelta::LineDelta(_, y) => y as f64,
        winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
    }
}

/// Feeds window pointer input through the drag-select state machine and
/// keeps the status line.
pub struct EventHandler {
    drag: DragState,
    input: InputState,
    /// Last status line produced by a pointer action.
    pub status: String,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
            input: InputState::new(),
            status: INITIAL_STATUS.to_string(),
        }
    }

    /// Current interaction state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Shape being dragged, if any.
    pub fn selected(&self) -> Option<ShapeId> {
        self.drag.selected()
    }

    /// Handle a cursor move. Returns true if the canvas needs a redraw.
    pub fn pointer_moved(&mut self, canvas: &mut Canvas, position: Point) -> bool {
        let event = self.input.move_to(position);
        self.apply(canvas, event)
    }

    /// Handle a button press at the current pointer position.
    pub fn button_pressed(&mut self, canvas: &mut Canvas, button: MouseButton) -> bool {
        let event = self.input.press(button);
        self.apply(canvas, event)
    }

    /// Handle a button release at the current pointer position.
    pub fn button_released(&mut self, canvas: &mut Canvas, button: MouseButton) -> bool {
        let event = self.input.release(button);
        self.apply(canvas, event)
    }

    /// Zoom about the pointer by a number of wheel lines.
    pub fn scrolled(&mut self, canvas: &mut Canvas, lines: f64) -> bool {
        if lines == 0.0 {
            return false;
        }
        let event = self.input.scroll(Vec2::new(0.0, lines));
        canvas
            .camera
            .zoom_at(event.position(), WHEEL_ZOOM_STEP.powf(lines));
        log::debug!("Zoom {:.3} at {:?}", canvas.camera.zoom, event.position());
        true
    }

    fn apply(&mut self, canvas: &mut Canvas, event: PointerEvent) -> bool {
        let before = self.drag;
        let transition = before.handle(&event, canvas);
        self.drag = transition.state;

        if std::mem::discriminant(&before) != std::mem::discriminant(&self.drag) {
            let kind = self
                .drag
                .selected()
                .and_then(|id| canvas.document.get_shape(id))
                .map_or("", Shape::kind_name);
            log::debug!("{:?} -> {:?} {kind}", before, self.drag);
        }

        match transition.status {
            Some(status) => {
                log::info!("{status}");
                self.status = status;
                true
            }
            None => before != self.drag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragboard_core::canvas::CanvasDocument;
    use kurbo::Rect;

    fn demo_canvas() -> Canvas {
        let mut canvas = Canvas::with_document(CanvasDocument::demo());
        canvas.set_viewport_size(800.0, 900.0);
        canvas.look_at(Rect::new(-100.0, -100.0, 100.0, 100.0));
        canvas
    }

    fn circle_center(canvas: &Canvas) -> Point {
        canvas
            .document
            .shapes_ordered()
            .find_map(|s| match s {
                Shape::Circle(c) => Some(c.center),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_initial_status() {
        let handler = EventHandler::new();
        assert_eq!(handler.status, INITIAL_STATUS);
        assert!(handler.drag_state().is_idle());
    }

    #[test]
    fn test_drag_circle_through_window_events() {
        let mut canvas = demo_canvas();
        let mut handler = EventHandler::new();
        let origin = canvas.camera.world_to_screen(Point::ZERO);

        handler.pointer_moved(&mut canvas, origin);
        assert!(handler.button_pressed(&mut canvas, MouseButton::Left));
        assert!(handler.drag_state().is_dragging());
        assert_eq!(handler.status, "Left click on shape at (0.00, 0.00) - start drag");

        // 4 px per unit and y flipped: (+20, +20) px is (+5, -5) in the scene
        assert!(handler.pointer_moved(&mut canvas, origin + Vec2::new(20.0, 20.0)));
        let center = circle_center(&canvas);
        assert!((center.x - 5.0).abs() < 1e-9);
        assert!((center.y + 5.0).abs() < 1e-9);
        assert_eq!(handler.status, "Dragging shape to (5.00, -5.00)");

        handler.button_released(&mut canvas, MouseButton::Left);
        assert!(handler.drag_state().is_idle());
        assert_eq!(handler.selected(), None);
        assert!((circle_center(&canvas).x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_without_button_does_nothing() {
        let mut canvas = demo_canvas();
        let mut handler = EventHandler::new();
        let origin = canvas.camera.world_to_screen(Point::ZERO);

        assert!(!handler.pointer_moved(&mut canvas, origin));
        assert!(!handler.pointer_moved(&mut canvas, origin + Vec2::new(10.0, 0.0)));
        assert_eq!(circle_center(&canvas), Point::ZERO);
        assert_eq!(handler.status, INITIAL_STATUS);
    }

    #[test]
    fn test_pan_on_empty_space() {
        let mut canvas = demo_canvas();
        let mut handler = EventHandler::new();
        let offset = canvas.camera.offset;

        handler.pointer_moved(&mut canvas, Point::new(20.0, 20.0));
        handler.button_pressed(&mut canvas, MouseButton::Left);
        assert!(handler.drag_state().is_panning());
        assert!(canvas.pan_enabled);
        assert!(handler.status.ends_with("- pan mode"));

        handler.pointer_moved(&mut canvas, Point::new(50.0, 10.0));
        assert_eq!(canvas.camera.offset, offset + Vec2::new(30.0, -10.0));
        assert_eq!(circle_center(&canvas), Point::ZERO);

        handler.button_released(&mut canvas, MouseButton::Left);
        assert!(!canvas.pan_enabled);
        // Moves after release no longer pan
        handler.pointer_moved(&mut canvas, Point::new(90.0, 90.0));
        assert_eq!(canvas.camera.offset, offset + Vec2::new(30.0, -10.0));
    }

    #[test]
    fn test_right_click_reports_only() {
        let mut canvas = demo_canvas();
        let mut handler = EventHandler::new();
        let origin = canvas.camera.world_to_screen(Point::ZERO);

        handler.pointer_moved(&mut canvas, origin);
        assert!(handler.button_pressed(&mut canvas, MouseButton::Right));
        assert!(handler.drag_state().is_idle());
        assert_eq!(handler.status, "Right click at (0.00, 0.00) - no action");
    }

    #[test]
    fn test_wheel_zoom_keeps_point_under_cursor() {
        let mut canvas = demo_canvas();
        let mut handler = EventHandler::new();
        let cursor = Point::new(300.0, 200.0);
        handler.pointer_moved(&mut canvas, cursor);
        let before = canvas.camera.screen_to_world(cursor);
        let zoom = canvas.camera.zoom;

        assert!(handler.scrolled(&mut canvas, 2.0));
        assert!(canvas.camera.zoom > zoom);
        let after = canvas.camera.screen_to_world(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        assert!(!handler.scrolled(&mut canvas, 0.0));
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(map_button(winit::event::MouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(winit::event::MouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_button(winit::event::MouseButton::Back), None);
    }

    #[test]
    fn test_wheel_lines() {
        use winit::dpi::PhysicalPosition;
        use winit::event::MouseScrollDelta;
        assert_eq!(wheel_lines(MouseScrollDelta::LineDelta(0.0, -1.0)), -1.0);
        assert_eq!(
            wheel_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 100.0))),
            2.0
        );
    }
}
