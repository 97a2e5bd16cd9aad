//! Styled egui building blocks shared by the Dragboard demos.
//!
//! - **Buttons**: flat text buttons and the accented action button
//! - **Form**: labeled single-line inputs and a read-only output area
//! - **Layout**: panel frames, section labels, separators

pub mod buttons;
pub mod form;
pub mod layout;

pub use buttons::{ActionButton, TextButton};
pub use form::{labeled_input, output_area, LABEL_WIDTH};
pub use layout::{overlay_frame, panel_frame, section_label, separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Row height for buttons and inputs
    pub const ROW_HEIGHT: f32 = 24.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Accent color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Accent color while hovered
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(37, 99, 235);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Translucent background for overlays drawn over the canvas
    pub const OVERLAY_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 24, 200);
    /// Text on dark overlays
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(230, 230, 230);
}
