//! Layout canvas: the ordered element collection of one certificate page.

use crate::binding::{BoundKey, CertificateData, ManualEdits};
use crate::element::{Element, ElementId, Geometry, PAGE_HEIGHT, PAGE_WIDTH};
use crate::session::{DragMode, DragState, EditorSession};
use crate::template::default_elements;
use kurbo::Point;
use std::num::IntErrorKind;
use uuid::Uuid;

/// Dimension editable through [`LayoutCanvas::set_geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryField {
    Width,
    Height,
}

/// Coerce user input to a non-negative whole number of pixels.
///
/// Reads the leading integer (`"120px"` -> 120, `"12.7"` -> 12); negative
/// values and unparseable input give 0. Integers too large to represent
/// saturate instead of resetting.
pub fn coerce_dimension(raw: &str) -> f64 {
    let raw = raw.trim();
    let end = raw
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    match raw[..end].parse::<i64>() {
        Ok(v) => v.max(0) as f64,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX as f64,
        Err(_) => 0.0,
    }
}

/// The element collection of one document plus its manual-override set.
///
/// Every mutation completes synchronously; interaction state lives in an
/// [`EditorSession`] passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct LayoutCanvas {
    elements: Vec<Element>,
    manual_edits: ManualEdits,
}

impl LayoutCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas holding the default template for `data`.
    pub fn with_defaults(data: &CertificateData) -> Self {
        Self {
            elements: default_elements(data),
            manual_edits: ManualEdits::new(),
        }
    }

    /// Replace the collection with previously saved elements, verbatim.
    pub fn load_saved(&mut self, session: &mut EditorSession, elements: Vec<Element>) {
        self.elements = elements;
        self.manual_edits = ManualEdits::new();
        session.reset();
    }

    /// Replace the collection with the default template for `data`.
    pub fn load_default(&mut self, session: &mut EditorSession, data: &CertificateData) {
        self.elements = default_elements(data);
        self.manual_edits = ManualEdits::new();
        session.reset();
    }

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids the user has overridden by hand.
    pub fn manual_edits(&self) -> &ManualEdits {
        &self.manual_edits
    }

    /// Topmost element containing a document-space point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.geometry.contains(point))
    }

    /// Append a new text element and return its id.
    pub fn add_text_element(&mut self, content: impl Into<String>, geometry: Geometry) -> ElementId {
        let id = format!("text-{}", Uuid::new_v4());
        self.elements.push(Element::text(id.clone(), content, geometry));
        id
    }

    /// Append a new image element and return its id.
    pub fn add_image_element(&mut self, source: impl Into<String>, geometry: Geometry) -> ElementId {
        let id = format!("image-{}", Uuid::new_v4());
        self.elements.push(Element::image(id.clone(), source, geometry));
        id
    }

    /// Select an element. Returns false (and changes nothing) for unknown ids.
    pub fn select_element(&self, session: &mut EditorSession, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        session.set_selection(Some(id.to_string()));
        true
    }

    pub fn clear_selection(&self, session: &mut EditorSession) {
        session.set_selection(None);
    }

    /// Start moving an element. The element becomes the selection.
    pub fn begin_drag(&self, session: &mut EditorSession, id: &str, pointer: Point) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        let offset = pointer - element.geometry.origin();
        session.set_selection(Some(id.to_string()));
        session.start_drag(DragState {
            element: id.to_string(),
            offset,
            mode: DragMode::Move,
        });
        log::debug!("Begin move of {}", id);
        true
    }

    /// Start resizing an element from its bottom-right corner.
    pub fn begin_resize(&self, session: &mut EditorSession, id: &str, pointer: Point) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        let offset = pointer - element.geometry.bottom_right();
        session.set_selection(Some(id.to_string()));
        session.start_drag(DragState {
            element: id.to_string(),
            offset,
            mode: DragMode::Resize,
        });
        log::debug!("Begin resize of {}", id);
        true
    }

    /// Apply a pointer move to the active drag. No-op when nothing is dragged.
    pub fn update_drag_position(&mut self, session: &EditorSession, pointer: Point) -> bool {
        let Some(drag) = session.drag() else {
            return false;
        };
        let target = pointer - drag.offset;
        let mode = drag.mode;
        let Some(element) = self.get_mut(&drag.element) else {
            return false;
        };

        match mode {
            DragMode::Move => element.geometry.move_to(target),
            DragMode::Resize => {
                let width = target.x - element.geometry.x;
                let height = target.y - element.geometry.y;
                element.geometry.resize_to(width, height);
            }
        }
        true
    }

    /// Finish the active drag. Idempotent.
    pub fn end_drag(&self, session: &mut EditorSession) {
        session.end_drag();
    }

    /// Overwrite content and mark the element as manually edited.
    pub fn set_content(&mut self, id: &str, text: impl Into<String>) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        element.content = text.into();
        if self.manual_edits.insert(id) {
            log::debug!("{} is now manually overridden", id);
        }
        true
    }

    /// Merge one style attribute, keeping the others.
    pub fn set_style(&mut self, id: &str, key: &str, value: &str) -> bool {
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        element.style.set(key, value);
        true
    }

    /// Overwrite width or height from raw user input (see [`coerce_dimension`]).
    ///
    /// Values are capped at the page's own width or height.
    pub fn set_geometry(&mut self, id: &str, field: GeometryField, raw: &str) -> bool {
        let value = coerce_dimension(raw);
        let Some(element) = self.get_mut(id) else {
            return false;
        };
        match field {
            GeometryField::Width => element.geometry.width = value.min(PAGE_WIDTH),
            GeometryField::Height => element.geometry.height = value.min(PAGE_HEIGHT),
        }
        true
    }

    /// Re-derive every bound element that has not been overridden by hand.
    ///
    /// Returns the number of elements whose content changed.
    pub fn reapply_bindings(&mut self, data: &CertificateData) -> usize {
        let mut changed = 0;
        for element in &mut self.elements {
            if self.manual_edits.contains(element.id()) {
                continue;
            }
            let Some(key) = BoundKey::from_element_id(element.id()) else {
                continue;
            };
            let content = key.derive(data);
            if element.content != content {
                element.content = content;
                changed += 1;
            }
        }
        changed
    }

    /// Order-preserving copy of the collection for persistence.
    pub fn serialize(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Serialize the collection to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.elements)
    }
}
