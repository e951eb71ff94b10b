//! Layout helpers: separators, labels and panel frames.

use egui::{Color32, CornerRadius, Frame, Margin, Stroke, Ui};

use crate::{sizing, theme};

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [
            egui::Pos2::new(rect.left(), y),
            egui::Pos2::new(rect.right(), y),
        ],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Heading for a group of inspector fields.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(12.0)
            .strong()
            .color(theme::TEXT),
    );
    ui.add_space(4.0);
}

/// Small muted caption above a single field.
pub fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_MUTED),
    );
}

/// Frame for the toolbar strip above the page.
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}
