//! Storage abstraction for template persistence.

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Persisted template data for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(default)]
    pub elements: Vec<Element>,
    /// True once a user has saved a layout; false for "no customization yet".
    #[serde(default)]
    pub is_saved_template: bool,
}

impl TemplateRecord {
    /// A record marked as a user-saved layout.
    pub fn saved(elements: Vec<Element>) -> Self {
        Self {
            elements,
            is_saved_template: true,
        }
    }
}

/// Response body of the template-data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDataResponse {
    pub template_data: TemplateRecord,
}

/// Request body for saving a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTemplateRequest {
    pub elements: Vec<Element>,
    #[serde(default = "default_true")]
    pub is_saved_template: bool,
}

fn default_true() -> bool {
    true
}

/// Trait for template storage backends.
pub trait TemplateStore: Send + Sync {
    /// Load the template stored under a document identifier.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<TemplateRecord>>;

    /// Persist elements under a document identifier as a saved template.
    fn save(&self, id: &str, elements: &[Element]) -> BoxFuture<'_, StorageResult<()>>;
}
