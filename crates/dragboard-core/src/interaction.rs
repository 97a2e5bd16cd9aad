//! Drag-select interaction state machine.
//!
//! A primary press on a shape selects it and starts an incremental drag; a
//! primary press on empty space enters pan mode; any release returns to
//! idle. The machine owns no scene data: every handler takes the current
//! [`DragState`] by value, talks to the scene through [`SceneTarget`], and
//! returns the next state together with an optional status line.

use crate::canvas::Canvas;
use crate::input::{MouseButton, PointerEvent};
use crate::shapes::ShapeId;
use kurbo::{Point, Vec2};

/// Hit tolerance in screen pixels.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Scene services the state machine relies on.
pub trait SceneTarget {
    /// Map a screen position into scene coordinates.
    fn to_scene(&self, screen: Point) -> Point;

    /// Front-most shape under a scene point, if any.
    fn hit(&self, scene: Point) -> Option<ShapeId>;

    /// Move a shape by a scene-space delta. Returns false if `id` is not
    /// part of the scene.
    fn translate_shape(&mut self, id: ShapeId, delta: Vec2) -> bool;

    /// Enable or disable camera panning.
    fn set_pan_enabled(&mut self, enabled: bool);

    /// Pan the camera by a screen-space delta.
    fn pan_by(&mut self, delta: Vec2);
}

/// Current interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Nothing selected, no drag in progress.
    #[default]
    Idle,
    /// Primary button went down on empty space; moves pan the camera.
    Panning {
        /// Last pointer position in screen coordinates.
        last_screen: Point,
    },
    /// A shape is selected and follows the pointer.
    Dragging {
        /// The selected shape.
        shape: ShapeId,
        /// Last pointer position in scene coordinates.
        anchor: Point,
    },
}

/// Result of feeding one event to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: DragState,
    /// Status line to show to the user, if the event produced one.
    pub status: Option<String>,
}

impl Transition {
    fn quiet(state: DragState) -> Self {
        Self {
            state,
            status: None,
        }
    }

    fn with_status(state: DragState, status: String) -> Self {
        Self {
            state,
            status: Some(status),
        }
    }
}

fn fmt_point(p: Point) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

impl DragState {
    /// The selected shape, if a drag is in progress.
    pub fn selected(&self) -> Option<ShapeId> {
        match self {
            DragState::Dragging { shape, .. } => Some(*shape),
            _ => None,
        }
    }

    /// The drag anchor in scene coordinates, if a drag is in progress.
    pub fn drag_anchor(&self) -> Option<Point> {
        match self {
            DragState::Dragging { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, DragState::Panning { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Feed a pointer event through the state machine.
    pub fn handle(self, event: &PointerEvent, target: &mut impl SceneTarget) -> Transition {
        match *event {
            PointerEvent::Down { position, button } => self.press(position, button, target),
            PointerEvent::Move { position, dragging } => self.drag(position, dragging, target),
            PointerEvent::Up { .. } => self.release(target),
            PointerEvent::Scroll { .. } => Transition::quiet(self),
        }
    }

    /// Handle a button press at a screen position.
    pub fn press(
        self,
        screen: Point,
        button: MouseButton,
        target: &mut impl SceneTarget,
    ) -> Transition {
        let pos = target.to_scene(screen);
        match button {
            MouseButton::Left => match target.hit(pos) {
                Some(shape) => {
                    log::debug!("Selected shape {shape} at {}", fmt_point(pos));
                    Transition::with_status(
                        DragState::Dragging { shape, anchor: pos },
                        format!("Left click on shape at {} - start drag", fmt_point(pos)),
                    )
                }
                None => {
                    target.set_pan_enabled(true);
                    log::debug!("Press on empty space, entering pan mode");
                    Transition::with_status(
                        DragState::Panning {
                            last_screen: screen,
                        },
                        format!("Left click on empty at {} - pan mode", fmt_point(pos)),
                    )
                }
            },
            MouseButton::Right => Transition::with_status(
                self,
                format!("Right click at {} - no action", fmt_point(pos)),
            ),
            MouseButton::Middle => Transition::quiet(self),
        }
    }

    /// Handle a pointer move at a screen position.
    pub fn drag(self, screen: Point, dragging: bool, target: &mut impl SceneTarget) -> Transition {
        if !dragging {
            return Transition::quiet(self);
        }
        match self {
            DragState::Dragging { shape, anchor } => {
                let current = target.to_scene(screen);
                if !target.translate_shape(shape, current - anchor) {
                    log::warn!("Dragged shape {shape} is no longer in the scene");
                    return Transition::quiet(self);
                }
                Transition::with_status(
                    DragState::Dragging {
                        shape,
                        anchor: current,
                    },
                    format!("Dragging shape to {}", fmt_point(current)),
                )
            }
            DragState::Panning { last_screen } => {
                target.pan_by(screen - last_screen);
                Transition::quiet(DragState::Panning {
                    last_screen: screen,
                })
            }
            DragState::Idle => Transition::quiet(self),
        }
    }

    /// Handle a button release. Always returns to [`DragState::Idle`].
    pub fn release(self, target: &mut impl SceneTarget) -> Transition {
        if !self.is_idle() {
            log::debug!("Release from {:?}", self);
        }
        target.set_pan_enabled(false);
        Transition::quiet(DragState::Idle)
    }
}

impl SceneTarget for Canvas {
    fn to_scene(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    fn hit(&self, scene: Point) -> Option<ShapeId> {
        self.document
            .shape_at(scene, HIT_TOLERANCE / self.camera.zoom)
    }

    fn translate_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        match self.document.get_shape_mut(id) {
            Some(shape) => {
                shape.translate(delta);
                true
            }
            None => false,
        }
    }

    fn set_pan_enabled(&mut self, enabled: bool) {
        self.pan_enabled = enabled;
    }

    fn pan_by(&mut self, delta: Vec2) {
        if self.pan_enabled {
            self.camera.pan(delta);
        }
    }
}
