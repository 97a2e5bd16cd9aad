//! UI components using egui.

use dragboard_render::GridStyle;
use dragboard_widgets::{
    overlay_frame, panel_frame, section_label, separator, ActionButton, TextButton,
    labeled_input, output_area, theme,
};
use egui::{Align2, Context, Pos2, RichText, Vec2};

use crate::form::ParamsForm;

/// What the canvas overlay shows this frame.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Last pointer action.
    pub status: String,
    /// Where the status label sits, in egui points.
    pub status_anchor: Pos2,
    /// Latest scene monitor summary.
    pub monitor_line: String,
    /// Camera zoom (screen pixels per scene unit).
    pub zoom: f64,
    pub grid_style: GridStyle,
}

/// Actions triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ZoomIn,
    ZoomOut,
    ResetView,
    CycleGrid,
    /// Refill the parameter form output.
    Print,
}

/// Render the canvas demo overlay: status label and view panel.
pub fn render_canvas_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    egui::Area::new(egui::Id::new("status_label"))
        .fixed_pos(ui_state.status_anchor)
        .interactable(false)
        .show(ctx, |ui| {
            overlay_frame().show(ui, |ui| {
                ui.label(
                    RichText::new(&ui_state.status)
                        .monospace()
                        .color(theme::OVERLAY_TEXT),
                );
            });
        });

    render_view_panel(ctx, ui_state)
}

fn render_view_panel(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("view_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(170.0);
                section_label(ui, "View");
                ui.label(
                    RichText::new(format!("Zoom {:.0}%", ui_state.zoom * 100.0))
                        .size(12.0)
                        .color(theme::TEXT),
                );
                if TextButton::new("Zoom in").shortcut("Wheel").show(ui) {
                    action = Some(UiAction::ZoomIn);
                }
                if TextButton::new("Zoom out").show(ui) {
                    action = Some(UiAction::ZoomOut);
                }
                if TextButton::new("Reset view").shortcut("0").show(ui) {
                    action = Some(UiAction::ResetView);
                }
                let grid_label = format!("Grid: {}", ui_state.grid_style.name());
                if TextButton::new(&grid_label).shortcut("G").show(ui) {
                    action = Some(UiAction::CycleGrid);
                }
                separator(ui);
                section_label(ui, &ui_state.monitor_line);
            });
        });

    action
}

/// Render the parameter form: one input row per field, the Print button and
/// the read-only output area.
pub fn render_params_ui(ctx: &Context, form: &mut ParamsForm) -> Option<UiAction> {
    let mut action = None;

    egui::CentralPanel::default()
        .frame(panel_frame())
        .show(ctx, |ui| {
            section_label(ui, &form.source.display().to_string());
            ui.add_space(4.0);

            egui::ScrollArea::vertical()
                .id_salt("params_fields")
                .max_height(ui.available_height() * 0.5)
                .show(ui, |ui| {
                    for field in form.params.iter_mut() {
                        labeled_input(ui, &field.label, &mut field.value);
                    }
                });

            ui.add_space(8.0);
            if ActionButton::new("Print").show(ui) {
                action = Some(UiAction::Print);
            }
            ui.add_space(8.0);
            separator(ui);
            section_label(ui, "Output");

            egui::ScrollArea::vertical()
                .id_salt("params_output")
                .show(ui, |ui| {
                    output_area(ui, &form.output, 8);
                });
        });

    action
}
