//! Transient interaction state for one editing session.

use crate::element::ElementId;
use kurbo::Vec2;

/// What a pointer drag does to the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// The element origin follows the pointer.
    Move,
    /// The bottom-right corner follows the pointer.
    Resize,
}

/// An in-progress pointer drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Element being dragged.
    pub element: ElementId,
    /// Pointer position minus the tracked corner at drag start.
    pub offset: Vec2,
    pub mode: DragMode,
}

/// Selection and drag state, owned by whoever drives the editor.
///
/// Kept apart from the element collection so it can be reset on load
/// without touching document data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    selection: Option<ElementId>,
    drag: Option<DragState>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected element id.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.as_deref() == Some(id)
    }

    pub(crate) fn set_selection(&mut self, id: Option<ElementId>) {
        self.selection = id;
    }

    /// Active drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub(crate) fn start_drag(&mut self, drag: DragState) {
        self.drag = Some(drag);
    }

    /// Finish any drag in progress. Idempotent.
    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Drag of {} finished", drag.element);
        }
    }

    /// Forget selection and drag, e.g. after a document load.
    pub fn reset(&mut self) {
        self.selection = None;
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_drag_idempotent() {
        let mut session = EditorSession::new();
        session.start_drag(DragState {
            element: "title".to_string(),
            offset: Vec2::new(1.0, 2.0),
            mode: DragMode::Move,
        });
        assert!(session.is_dragging());

        session.end_drag();
        assert!(!session.is_dragging());
        session.end_drag();
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = EditorSession::new();
        session.set_selection(Some("title".to_string()));
        session.start_drag(DragState {
            element: "title".to_string(),
            offset: Vec2::ZERO,
            mode: DragMode::Resize,
        });

        session.reset();
        assert_eq!(session, EditorSession::new());
    }
}
