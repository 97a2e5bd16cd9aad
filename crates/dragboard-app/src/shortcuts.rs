//! Keyboard shortcut registry.

use winit::keyboard::{Key, NamedKey};

/// Name of a key as used by [`Shortcut::key`], for the keys shortcuts use.
pub fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::Escape) => Some("Escape"),
        Key::Named(NamedKey::F11) => Some("F11"),
        Key::Character(c) => Some(c.as_str()),
        _ => None,
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Close,
    ToggleFullscreen,
    /// Frame the initial view rectangle again.
    ResetView,
    /// Cycle the grid style.
    CycleGrid,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub action: ShortcutAction,
    pub description: &'static str,
    /// Only active in the canvas demo.
    pub canvas_only: bool,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        action: ShortcutAction,
        description: &'static str,
        canvas_only: bool,
    ) -> Self {
        Self {
            key,
            action,
            description,
            canvas_only,
        }
    }

    /// Whether this shortcut fires for a key name (letters match either case).
    pub fn matches(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Escape", ShortcutAction::Close, "Close the window", false),
            Shortcut::new("F11", ShortcutAction::ToggleFullscreen, "Toggle fullscreen", false),
            Shortcut::new("0", ShortcutAction::ResetView, "Reset the view", true),
            Shortcut::new("G", ShortcutAction::CycleGrid, "Cycle grid style", true),
        ]
    }

    /// Shortcuts available in the given demo.
    pub fn for_demo(canvas: bool) -> Vec<Shortcut> {
        Self::all()
            .into_iter()
            .filter(|s| canvas || !s.canvas_only)
            .collect()
    }

    /// Resolve a key name to an action.
    pub fn lookup(key: &str, canvas: bool) -> Option<ShortcutAction> {
        Self::for_demo(canvas)
            .into_iter()
            .find(|s| s.matches(key))
            .map(|s| s.action)
    }

    /// One-line summary for the startup log, e.g. `Escape=Close the window, ...`.
    pub fn summary(canvas: bool) -> String {
        Self::for_demo(canvas)
            .iter()
            .map(|s| format!("{}={}", s.key, s.description))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
