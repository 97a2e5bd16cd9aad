//! Dragboard Application
//!
//! The native application shell: command line, window, GPU surface, egui
//! overlay, and the canvas and parameter form demos.

mod app;
mod cli;
mod event_handler;
mod form;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, Demo};
pub use cli::{Cli, Commands};
pub use event_handler::EventHandler;
pub use form::ParamsForm;
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use ui::{UiAction, UiState};
