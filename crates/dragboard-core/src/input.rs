//! Pointer input state for the canvas.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    Middle,
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
        /// Whether the primary button is held during this move.
        dragging: bool,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

impl PointerEvent {
    /// Screen position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }
}

/// Tracks pointer state between window events and turns raw button and
/// cursor updates into [`PointerEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Whether the primary button is held.
    pub is_dragging: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a button press at the current pointer position.
    pub fn press(&mut self, button: MouseButton) -> PointerEvent {
        if button == MouseButton::Left {
            self.is_dragging = true;
        }
        PointerEvent::Down {
            position: self.pointer_position,
            button,
        }
    }

    /// Record a button release at the current pointer position.
    pub fn release(&mut self, button: MouseButton) -> PointerEvent {
        if button == MouseButton::Left {
            self.is_dragging = false;
        }
        PointerEvent::Up {
            position: self.pointer_position,
            button,
        }
    }

    /// Record a cursor move.
    pub fn move_to(&mut self, position: Point) -> PointerEvent {
        self.pointer_position = position;
        PointerEvent::Move {
            position,
            dragging: self.is_dragging,
        }
    }

    /// Record a wheel scroll at the current pointer position.
    pub fn scroll(&mut self, delta: Vec2) -> PointerEvent {
        PointerEvent::Scroll {
            position: self.pointer_position,
            delta,
        }
    }
}
