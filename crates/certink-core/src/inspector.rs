//! Property inspector model.
//!
//! [`InspectorView`] describes which fields the side panel shows for the
//! current selection; [`InspectorEdit`] is a single field change written back
//! through [`apply_edit`]. UI code only renders the view and forwards edits.

use crate::canvas::{GeometryField, LayoutCanvas};
use crate::element::{ElementId, ElementKind, FontWeight, Style, TextAlign, page_size};
use crate::session::EditorSession;
use kurbo::Size;

/// Editable fields for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorView {
    /// Nothing selected: document-level information.
    Document {
        page_size: Size,
        element_count: usize,
        overridden_count: usize,
    },
    Text {
        id: ElementId,
        content: String,
        font_size: String,
        font_weight: FontWeight,
        text_align: TextAlign,
    },
    /// Image source is fixed at creation; only the size is editable.
    Image {
        id: ElementId,
        source: String,
        width: f64,
        height: f64,
    },
}

impl InspectorView {
    /// Build the view for whatever `session` has selected.
    pub fn for_selection(canvas: &LayoutCanvas, session: &EditorSession) -> Self {
        let selected = session.selection().and_then(|id| canvas.get(id));
        let Some(element) = selected else {
            return InspectorView::Document {
                page_size: page_size(),
                element_count: canvas.len(),
                overridden_count: canvas.manual_edits().len(),
            };
        };

        match element.kind() {
            ElementKind::Text => InspectorView::Text {
                id: element.id().to_string(),
                content: element.content.clone(),
                font_size: element.style.font_size().to_string(),
                font_weight: element.style.font_weight(),
                text_align: element.style.text_align(),
            },
            ElementKind::Image => InspectorView::Image {
                id: element.id().to_string(),
                source: element.content.clone(),
                width: element.geometry.width,
                height: element.geometry.height,
            },
        }
    }

    /// Id of the element being inspected, if any.
    pub fn element_id(&self) -> Option<&str> {
        match self {
            InspectorView::Document { .. } => None,
            InspectorView::Text { id, .. } | InspectorView::Image { id, .. } => Some(id),
        }
    }
}

/// A single field change from the inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectorEdit {
    Content(String),
    FontSize(String),
    FontWeight(FontWeight),
    TextAlign(TextAlign),
    Width(String),
    Height(String),
}

impl InspectorEdit {
    fn applies_to(&self, kind: ElementKind) -> bool {
        match self {
            InspectorEdit::Content(_)
            | InspectorEdit::FontSize(_)
            | InspectorEdit::FontWeight(_)
            | InspectorEdit::TextAlign(_) => kind == ElementKind::Text,
            InspectorEdit::Width(_) | InspectorEdit::Height(_) => kind == ElementKind::Image,
        }
    }
}

/// Write an inspector edit back into the canvas.
///
/// Returns false when the element is unknown, the field does not exist for
/// its kind, or the value was rejected (an empty font size).
pub fn apply_edit(canvas: &mut LayoutCanvas, id: &str, edit: InspectorEdit) -> bool {
    let Some(element) = canvas.get(id) else {
        return false;
    };
    if !edit.applies_to(element.kind()) {
        return false;
    }

    match edit {
        InspectorEdit::Content(text) => canvas.set_content(id, text),
        InspectorEdit::FontSize(size) => {
            let size = size.trim();
            if size.is_empty() {
                return false;
            }
            canvas.set_style(id, Style::FONT_SIZE, size)
        }
        InspectorEdit::FontWeight(weight) => canvas.set_style(id, Style::FONT_WEIGHT, weight.as_str()),
        InspectorEdit::TextAlign(align) => canvas.set_style(id, Style::TEXT_ALIGN, align.as_str()),
        InspectorEdit::Width(raw) => canvas.set_geometry(id, GeometryField::Width, &raw),
        InspectorEdit::Height(raw) => canvas.set_geometry(id, GeometryField::Height, &raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::CertificateData;

    fn setup() -> (LayoutCanvas, EditorSession) {
        (
            LayoutCanvas::with_defaults(&CertificateData::default()),
            EditorSession::new(),
        )
    }

    #[test]
    fn test_document_view_without_selection() {
        let (canvas, session) = setup();
        let view = InspectorView::for_selection(&canvas, &session);
        assert_eq!(
            view,
            InspectorView::Document {
                page_size: Size::new(595.0, 842.0),
                element_count: canvas.len(),
                overridden_count: 0,
            }
        );
        assert_eq!(view.element_id(), None);
    }

    #[test]
    fn test_text_view_fields() {
        let (canvas, mut session) = setup();
        canvas.select_element(&mut session, "title");
        match InspectorView::for_selection(&canvas, &session) {
            InspectorView::Text {
                id,
                content,
                font_size,
                font_weight,
                text_align,
            } => {
                assert_eq!(id, "title");
                assert_eq!(content, "CERTIFICATE OF REGISTRATION");
                assert_eq!(font_size, "26px");
                assert_eq!(font_weight, FontWeight::Bold);
                assert_eq!(text_align, TextAlign::Center);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_image_view_fields() {
        let (canvas, mut session) = setup();
        canvas.select_element(&mut session, "header-image");
        let view = InspectorView::for_selection(&canvas, &session);
        assert!(matches!(view, InspectorView::Image { width, .. } if width == 595.0));
    }

    #[test]
    fn test_content_edit_marks_override() {
        let (mut canvas, _) = setup();
        assert!(apply_edit(&mut canvas, "client-name", InspectorEdit::Content("XYZ Ltd".into())));
        assert_eq!(canvas.get("client-name").unwrap().content, "XYZ Ltd");
        assert!(canvas.manual_edits().contains("client-name"));
    }

    #[test]
    fn test_empty_font_size_rejected() {
        let (mut canvas, _) = setup();
        assert!(!apply_edit(&mut canvas, "title", InspectorEdit::FontSize("  ".into())));
        assert_eq!(canvas.get("title").unwrap().style.font_size(), "26px");

        assert!(apply_edit(&mut canvas, "title", InspectorEdit::FontSize("2em".into())));
        assert_eq!(canvas.get("title").unwrap().style.font_size(), "2em");
    }

    #[test]
    fn test_style_edits() {
        let (mut canvas, _) = setup();
        apply_edit(&mut canvas, "standard", InspectorEdit::FontWeight(FontWeight::Lighter));
        apply_edit(&mut canvas, "standard", InspectorEdit::TextAlign(TextAlign::Right));
        let style = &canvas.get("standard").unwrap().style;
        assert_eq!(style.get("fontWeight"), Some("lighter"));
        assert_eq!(style.get("textAlign"), Some("right"));
    }

    #[test]
    fn test_image_size_edits_never_fail() {
        let (mut canvas, _) = setup();
        assert!(apply_edit(&mut canvas, "footer-image", InspectorEdit::Width("400".into())));
        assert!(apply_edit(&mut canvas, "footer-image", InspectorEdit::Height("tall".into())));
        let g = canvas.get("footer-image").unwrap().geometry;
        assert_eq!((g.width, g.height), (400.0, 0.0));
    }

    #[test]
    fn test_edit_kind_mismatch_ignored() {
        let (mut canvas, _) = setup();
        assert!(!apply_edit(&mut canvas, "header-image", InspectorEdit::Content("x".into())));
        assert!(!apply_edit(&mut canvas, "title", InspectorEdit::Width("10".into())));
        assert!(!apply_edit(&mut canvas, "missing", InspectorEdit::Content("x".into())));
        assert!(canvas.manual_edits().is_empty());
    }
}
