//! Save/preview toolbar.

use certink_core::{TemplateEditor, TemplateStore};
use egui::{Color32, CornerRadius, CursorIcon, FontId, Pos2, Rect, Sense, Ui, vec2};

use crate::layout::toolbar_frame;
use crate::{sizing, theme};

/// A text button that can be disabled.
pub struct TextButton<'a> {
    label: &'a str,
    enabled: bool,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
        }
    }

    /// Disabled buttons ignore clicks and draw muted.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button. Returns whether it was clicked while enabled, and its rect.
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let font = FontId::proportional(12.0);
        let color = if self.enabled { theme::TEXT } else { theme::TEXT_MUTED };
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font, color);
        let size = vec2(galley.size().x + 16.0, sizing::BUTTON_HEIGHT);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().galley(
                Pos2::new(rect.left() + 8.0, rect.center().y - galley.size().y / 2.0),
                galley,
                color,
            );
        }

        let clicked = self.enabled && response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        } else {
            response.on_hover_cursor(CursorIcon::NotAllowed);
        }
        (clicked, rect)
    }
}

/// Something the user asked the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Start [`TemplateEditor::save`].
    Save,
    /// A preview was rendered into [`ToolbarOutput::preview`].
    Preview,
}

/// Result of showing the toolbar for one frame.
#[derive(Debug, Clone)]
pub struct ToolbarOutput {
    pub action: Option<ToolbarAction>,
    /// SVG of the current layout, set when Preview was clicked.
    pub preview: Option<String>,
    /// Screen rect of the save button.
    pub save_rect: Rect,
}

/// Toolbar with Save and Preview.
///
/// Save is disabled and labelled "Saving…" while a save is in flight. The
/// host drives the save itself so the editor stays borrowable for the UI.
#[derive(Debug, Clone, Default)]
pub struct EditorToolbar;

impl EditorToolbar {
    pub fn new() -> Self {
        Self
    }

    /// Label of the save button.
    pub fn save_label(saving: bool) -> &'static str {
        if saving { "Saving…" } else { "Save" }
    }

    pub fn show<S: TemplateStore>(&self, ui: &mut Ui, editor: &TemplateEditor<S>) -> ToolbarOutput {
        let saving = editor.is_saving();
        let mut action = None;
        let mut preview = None;
        let mut save_rect = Rect::NOTHING;

        toolbar_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                let (clicked, rect) = TextButton::new(Self::save_label(saving))
                    .enabled(!saving)
                    .show(ui);
                save_rect = rect;
                if clicked {
                    log::debug!("Save requested for {}", editor.document_id());
                    action = Some(ToolbarAction::Save);
                }

                if TextButton::new("Preview").show(ui).0 {
                    preview = Some(editor.preview());
                    action = Some(ToolbarAction::Preview);
                }

                if saving {
                    ui.label(
                        egui::RichText::new("Saving template…")
                            .size(11.0)
                            .italics()
                            .color(theme::ACCENT),
                    );
                }
            });
        });

        ToolbarOutput {
            action,
            preview,
            save_rect,
        }
    }
}
