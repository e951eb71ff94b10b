//! Property inspector side panel.

use certink_core::element::{FontWeight, TextAlign};
use certink_core::{BoundKey, EditorSession, InspectorEdit, InspectorView, LayoutCanvas, apply_edit};
use egui::{ComboBox, TextEdit, Ui};

use crate::layout::{field_label, section_label, separator};
use crate::theme;

/// Renders [`InspectorView`] and writes every change straight back.
#[derive(Debug, Clone, Default)]
pub struct InspectorPanel {
    /// Optional document identifier shown in the document view.
    document_id: Option<String>,
}

impl InspectorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show this document identifier when nothing is selected.
    pub fn document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Show the panel. Returns true if any edit was applied this frame.
    pub fn show(&self, ui: &mut Ui, canvas: &mut LayoutCanvas, session: &EditorSession) -> bool {
        let view = InspectorView::for_selection(canvas, session);
        let Some(id) = view.element_id().map(str::to_string) else {
            self.show_document(ui, &view);
            return false;
        };

        let edits = match view {
            InspectorView::Text {
                content,
                font_size,
                font_weight,
                text_align,
                ..
            } => {
                section_label(ui, "Text");
                binding_hint(ui, canvas, &id);
                text_fields(ui, content, font_size, font_weight, text_align)
            }
            InspectorView::Image {
                source,
                width,
                height,
                ..
            } => {
                section_label(ui, "Image");
                field_label(ui, "Source");
                ui.label(egui::RichText::new(source).size(11.0).color(theme::TEXT));
                separator(ui);
                image_fields(ui, width, height)
            }
            InspectorView::Document { .. } => Vec::new(),
        };

        let mut changed = false;
        for edit in edits {
            log::debug!("Inspector edit on {}: {:?}", id, edit);
            changed |= apply_edit(canvas, &id, edit);
        }
        changed
    }

    fn show_document(&self, ui: &mut Ui, view: &InspectorView) {
        let InspectorView::Document {
            page_size,
            element_count,
            overridden_count,
        } = view
        else {
            return;
        };

        section_label(ui, "Document");
        if let Some(id) = &self.document_id {
            field_label(ui, "Identifier");
            ui.label(id.as_str());
        }
        field_label(ui, "Page size");
        ui.label(format!("{} × {} px", page_size.width, page_size.height));
        field_label(ui, "Elements");
        ui.label(element_count.to_string());
        field_label(ui, "Manually edited");
        ui.label(overridden_count.to_string());
    }
}

fn binding_hint(ui: &mut Ui, canvas: &LayoutCanvas, id: &str) {
    if BoundKey::from_element_id(id).is_none() {
        return;
    }
    let hint = if canvas.manual_edits().contains(id) {
        "Edited by hand; certificate data no longer applies"
    } else {
        "Filled from certificate data"
    };
    ui.label(egui::RichText::new(hint).size(10.0).italics().color(theme::TEXT_MUTED));
    ui.add_space(4.0);
}

fn text_fields(
    ui: &mut Ui,
    mut content: String,
    mut font_size: String,
    mut font_weight: FontWeight,
    mut text_align: TextAlign,
) -> Vec<InspectorEdit> {
    let mut edits = Vec::new();

    field_label(ui, "Content");
    let response = ui.add(
        TextEdit::multiline(&mut content)
            .desired_width(f32::INFINITY)
            .desired_rows(3),
    );
    if response.changed() {
        edits.push(InspectorEdit::Content(content));
    }
    separator(ui);

    field_label(ui, "Font size");
    if ui.text_edit_singleline(&mut font_size).changed() {
        edits.push(InspectorEdit::FontSize(font_size));
    }

    field_label(ui, "Font weight");
    let before = font_weight;
    ComboBox::from_id_salt("inspector_font_weight")
        .selected_text(font_weight.display_name())
        .show_ui(ui, |ui| {
            for weight in FontWeight::all() {
                ui.selectable_value(&mut font_weight, *weight, weight.display_name());
            }
        });
    if font_weight != before {
        edits.push(InspectorEdit::FontWeight(font_weight));
    }

    field_label(ui, "Alignment");
    let before = text_align;
    ui.horizontal(|ui| {
        for align in TextAlign::all() {
            ui.selectable_value(&mut text_align, *align, align.display_name());
        }
    });
    if text_align != before {
        edits.push(InspectorEdit::TextAlign(text_align));
    }

    edits
}

fn image_fields(ui: &mut Ui, width: f64, height: f64) -> Vec<InspectorEdit> {
    let mut edits = Vec::new();
    let mut width = width.to_string();
    let mut height = height.to_string();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            field_label(ui, "Width");
            if ui.add(TextEdit::singleline(&mut width).desired_width(80.0)).changed() {
                edits.push(InspectorEdit::Width(width.clone()));
            }
        });
        ui.vertical(|ui| {
            field_label(ui, "Height");
            if ui.add(TextEdit::singleline(&mut height).desired_width(80.0)).changed() {
                edits.push(InspectorEdit::Height(height.clone()));
            }
        });
    });

    edits
}
