//! CertInk Core Library
//!
//! Platform-agnostic data structures and logic for the CertInk certificate
//! template editor: the page element model, the data-binding overlay, the
//! property inspector model, persistence and save/preview orchestration.

pub mod binding;
pub mod canvas;
pub mod editor;
pub mod element;
pub mod inspector;
pub mod preview;
pub mod session;
pub mod storage;
pub mod template;

pub use binding::{BoundKey, CertificateData, ManualEdits, format_date};
pub use canvas::{GeometryField, LayoutCanvas};
pub use editor::{LoadOutcome, SaveError, TemplateEditor};
pub use element::{
    Element, ElementId, ElementKind, FontWeight, Geometry, ObjectFit, PAGE_HEIGHT, PAGE_WIDTH,
    Style, TextAlign, page_size,
};
pub use inspector::{InspectorEdit, InspectorView, apply_edit};
pub use preview::render_svg;
pub use session::{DragMode, DragState, EditorSession};
pub use storage::{HttpStore, MemoryStore, StorageError, StorageResult, TemplateRecord, TemplateStore};
