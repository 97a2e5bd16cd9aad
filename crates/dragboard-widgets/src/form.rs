//! Form rows: labeled inputs and the read-only output area.

use egui::{Align, FontId, Layout, Response, RichText, TextEdit, Ui, vec2};

use crate::{sizing, theme};

/// Width reserved for the label column of a form row.
pub const LABEL_WIDTH: f32 = 140.0;

/// Show one `label | text input` row. Returns the input's response.
pub fn labeled_input(ui: &mut Ui, label: &str, value: &mut String) -> Response {
    ui.horizontal(|ui| {
        ui.allocate_ui_with_layout(
            vec2(LABEL_WIDTH, sizing::ROW_HEIGHT),
            Layout::left_to_right(Align::Center),
            |ui| {
                ui.label(RichText::new(label).size(12.0).color(theme::TEXT));
            },
        );
        ui.add(
            TextEdit::singleline(value)
                .desired_width(f32::INFINITY)
                .font(FontId::proportional(12.0)),
        )
    })
    .inner
}

/// Show a read-only multi-line text area filling the remaining width.
///
/// The text is shown through an immutable `&str` buffer so the user can
/// select and copy it but not edit it.
pub fn output_area(ui: &mut Ui, text: &str, rows: usize) -> Response {
    let mut view = text;
    ui.add(
        TextEdit::multiline(&mut view)
            .desired_width(f32::INFINITY)
            .desired_rows(rows)
            .font(FontId::monospace(12.0)),
    )
}
