//! Save/preview orchestration for one certificate template.

use crate::binding::CertificateData;
use crate::canvas::LayoutCanvas;
use crate::element::page_size;
use crate::preview::render_svg;
use crate::session::EditorSession;
use crate::storage::{StorageError, TemplateStore};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Save errors.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Another save for this document is still in flight.
    #[error("A save is already in progress")]
    AlreadySaving,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where the loaded elements came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A layout the user saved earlier.
    Saved,
    /// The starter template (nothing saved, or the fetch failed).
    Default,
}

/// Clears the in-flight flag when dropped, including on error or cancellation.
struct SaveGuard<'a>(&'a AtomicBool);

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Editor for the template of one document.
pub struct TemplateEditor<S: TemplateStore> {
    store: Arc<S>,
    document_id: String,
    canvas: LayoutCanvas,
    session: EditorSession,
    data: CertificateData,
    saving: AtomicBool,
}

impl<S: TemplateStore> TemplateEditor<S> {
    /// Create an editor showing the default template for `data`.
    ///
    /// Call [`TemplateEditor::load`] to pick up a previously saved layout.
    pub fn new(store: Arc<S>, document_id: impl Into<String>, data: CertificateData) -> Self {
        Self {
            store,
            document_id: document_id.into(),
            canvas: LayoutCanvas::with_defaults(&data),
            session: EditorSession::new(),
            data,
            saving: AtomicBool::new(false),
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn canvas(&self) -> &LayoutCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut LayoutCanvas {
        &mut self.canvas
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    /// Canvas and session together, for UI code that drives both.
    pub fn parts_mut(&mut self) -> (&mut LayoutCanvas, &mut EditorSession) {
        (&mut self.canvas, &mut self.session)
    }

    /// Current certificate record.
    pub fn data(&self) -> &CertificateData {
        &self.data
    }

    /// Replace the certificate record and re-derive bound elements.
    pub fn set_certificate_data(&mut self, data: CertificateData) {
        if data == self.data {
            return;
        }
        self.data = data;
        let changed = self.canvas.reapply_bindings(&self.data);
        log::debug!("Certificate data changed, {} bound elements updated", changed);
    }

    /// Load the saved layout, falling back to the default template.
    ///
    /// Never fails: a missing layout is the normal "nothing saved yet" case
    /// and any other error is logged and treated the same way.
    pub async fn load(&mut self) -> LoadOutcome {
        let result = self.store.load(&self.document_id).await;
        match result {
            Ok(record) if record.is_saved_template => {
                log::info!(
                    "Loaded saved template for {} ({} elements)",
                    self.document_id,
                    record.elements.len()
                );
                self.canvas.load_saved(&mut self.session, record.elements);
                LoadOutcome::Saved
            }
            Ok(_) | Err(StorageError::NotFound(_)) => {
                log::info!("No saved template for {}, using defaults", self.document_id);
                self.canvas.load_default(&mut self.session, &self.data);
                LoadOutcome::Default
            }
            Err(e) => {
                log::warn!(
                    "Failed to load template for {}, using defaults: {}",
                    self.document_id,
                    e
                );
                self.canvas.load_default(&mut self.session, &self.data);
                LoadOutcome::Default
            }
        }
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Persist the current elements as this document's saved template.
    ///
    /// Rejected with [`SaveError::AlreadySaving`] while another save is in
    /// flight. Local state is never modified.
    pub async fn save(&self) -> Result<(), SaveError> {
        let Some(_guard) = SaveGuard::acquire(&self.saving) else {
            log::debug!("Save of {} ignored, one is already running", self.document_id);
            return Err(SaveError::AlreadySaving);
        };

        let elements = self.canvas.serialize();
        match self.store.save(&self.document_id, &elements).await {
            Ok(()) => {
                log::info!("Saved template for {} ({} elements)", self.document_id, elements.len());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to save template for {}: {}", self.document_id, e);
                Err(e.into())
            }
        }
    }

    /// Render the current, possibly unsaved, layout as SVG.
    pub fn preview(&self) -> String {
        render_svg(self.canvas.elements(), page_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Geometry};
    use crate::storage::{BoxFuture, MemoryStore, StorageResult, TemplateRecord};
    use std::sync::atomic::AtomicUsize;

    fn sample_data() -> CertificateData {
        CertificateData {
            client_name: "ABC Corp".to_string(),
            standard: "ISO 9001:2015".to_string(),
            scope: "Widget manufacturing".to_string(),
            certificate_number: Some("1234".to_string()),
            original_registration_date: "2024-01-15".to_string(),
            issue_date: "2025-01-15".to_string(),
            expiry_date: "2028-01-15".to_string(),
            ..Default::default()
        }
    }

    /// Store that counts submissions, yields once per call and can be told to fail.
    #[derive(Default)]
    struct CountingStore {
        saves: AtomicUsize,
        fail: AtomicBool,
    }

    impl TemplateStore for CountingStore {
        fn load(&self, _id: &str) -> BoxFuture<'_, StorageResult<TemplateRecord>> {
            Box::pin(async move { Err(StorageError::Http("connection refused".to_string())) })
        }

        fn save(&self, _id: &str, _elements: &[Element]) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async move {
                self.saves.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                if self.fail.load(Ordering::SeqCst) {
                    Err(StorageError::Http("500 Internal Server Error".to_string()))
                } else {
                    Ok(())
                }
            })
        }
    }

    fn content<'a, S: TemplateStore>(editor: &'a TemplateEditor<S>, id: &str) -> &'a str {
        &editor.canvas().get(id).unwrap().content
    }

    #[tokio::test]
    async fn test_load_not_found_uses_defaults() {
        let mut editor = TemplateEditor::new(Arc::new(MemoryStore::new()), "cert-1", sample_data());
        assert_eq!(editor.load().await, LoadOutcome::Default);
        assert_eq!(content(&editor, "client-name"), "ABC Corp");
        assert_eq!(content(&editor, "issue-date"), "Date of certificate: 15/01/2025");
    }

    #[tokio::test]
    async fn test_load_error_falls_back_silently() {
        let mut editor = TemplateEditor::new(Arc::new(CountingStore::default()), "cert-1", sample_data());
        editor.canvas_mut().set_content("title", "changed");

        assert_eq!(editor.load().await, LoadOutcome::Default);
        assert_eq!(content(&editor, "title"), "CERTIFICATE OF REGISTRATION");
        assert!(editor.canvas().manual_edits().is_empty());
    }

    #[tokio::test]
    async fn test_load_unsaved_record_uses_defaults() {
        let store = MemoryStore::new();
        store
            .insert(
                "cert-1",
                TemplateRecord {
                    elements: vec![Element::text("stale", "x", Geometry::default())],
                    is_saved_template: false,
                },
            )
            .unwrap();
        let mut editor = TemplateEditor::new(Arc::new(store), "cert-1", sample_data());

        assert_eq!(editor.load().await, LoadOutcome::Default);
        assert!(editor.canvas().get("stale").is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let mut editor = TemplateEditor::new(store.clone(), "cert-1", sample_data());
        editor.canvas_mut().set_content("client-name", "XYZ Ltd");
        editor.save().await.unwrap();
        let saved = editor.canvas().serialize();

        let mut other_data = sample_data();
        other_data.client_name = "Someone Else".to_string();
        let mut reopened = TemplateEditor::new(store, "cert-1", other_data);
        assert_eq!(reopened.load().await, LoadOutcome::Saved);
        assert_eq!(reopened.canvas().serialize(), saved);
        assert_eq!(content(&reopened, "client-name"), "XYZ Ltd");
    }

    #[tokio::test]
    async fn test_concurrent_save_submits_once() {
        let store = Arc::new(CountingStore::default());
        let editor = TemplateEditor::new(store.clone(), "cert-1", sample_data());

        let (first, second) = tokio::join!(editor.save(), editor.save());
        assert!(first.is_ok());
        assert!(matches!(second, Err(SaveError::AlreadySaving)));
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        assert!(!editor.is_saving());

        editor.save().await.unwrap();
        assert_eq!(store.saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_local_state() {
        let store = Arc::new(CountingStore::default());
        store.fail.store(true, Ordering::SeqCst);
        let mut editor = TemplateEditor::new(store.clone(), "cert-1", sample_data());
        editor.canvas_mut().set_content("title", "Edited");
        let before = editor.canvas().serialize();

        let result = editor.save().await;
        assert!(matches!(result, Err(SaveError::Storage(StorageError::Http(_)))));
        assert_eq!(editor.canvas().serialize(), before);
        assert!(!editor.is_saving());

        store.fail.store(false, Ordering::SeqCst);
        assert!(editor.save().await.is_ok());
    }

    #[test]
    fn test_data_change_respects_manual_override() {
        let mut editor = TemplateEditor::new(Arc::new(MemoryStore::new()), "cert-1", sample_data());
        editor.canvas_mut().set_content("client-name", "XYZ Ltd");

        let mut data = sample_data();
        data.client_name = "New Corp".to_string();
        data.standard = "ISO 27001:2022".to_string();
        editor.set_certificate_data(data);
        editor.set_certificate_data(sample_data());

        assert_eq!(content(&editor, "client-name"), "XYZ Ltd");
        assert_eq!(content(&editor, "standard"), "Standard: ISO 9001:2015");
    }

    #[test]
    fn test_preview_uses_unsaved_state() {
        let mut editor = TemplateEditor::new(Arc::new(MemoryStore::new()), "cert-1", sample_data());
        editor.canvas_mut().set_content("title", "Draft Title");
        let svg = editor.preview();
        assert!(svg.contains("Draft Title"));
        assert!(svg.contains("ABC Corp"));
    }
}
