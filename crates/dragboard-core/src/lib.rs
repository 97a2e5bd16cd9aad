//! Dragboard Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Dragboard canvas and parameter form demos.

pub mod camera;
pub mod canvas;
pub mod input;
pub mod interaction;
pub mod monitor;
pub mod params;
pub mod shapes;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument, DocumentError};
pub use input::{InputState, MouseButton, PointerEvent};
pub use interaction::{DragState, SceneTarget, Transition};
pub use monitor::SceneMonitor;
pub use params::{ParameterSet, ParamsError};
