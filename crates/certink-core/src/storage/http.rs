//! REST storage backed by the template-data endpoint.

use super::{
    BoxFuture, SaveTemplateRequest, StorageError, StorageResult, TemplateDataResponse,
    TemplateRecord, TemplateStore,
};
use crate::element::Element;
use reqwest::{StatusCode, Url};

/// Storage talking to `{base_url}/api/certificates/{id}/template-data`.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Create a store with a default HTTP client.
    pub fn new(base_url: impl Into<String>) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("certink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StorageError::Http(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a store reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL of the template-data endpoint for a document.
    ///
    /// The id is a single path segment; `/`, `?` and `#` in it are
    /// percent-encoded.
    pub fn endpoint(&self, id: &str) -> StorageResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StorageError::Http(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::Http(format!("Base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "certificates", id, "template-data"]);
        Ok(url)
    }
}

impl TemplateStore for HttpStore {
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<TemplateRecord>> {
        let url = self.endpoint(id);
        let id = id.to_string();
        Box::pin(async move {
            let url = url?;
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| StorageError::Http(format!("GET {} failed: {}", url, e)))?;

            if response.status() == StatusCode::NOT_FOUND {
                return Err(StorageError::NotFound(id));
            }
            let response = response
                .error_for_status()
                .map_err(|e| StorageError::Http(e.to_string()))?;

            let body: TemplateDataResponse = response
                .json()
                .await
                .map_err(|e| StorageError::Serialization(format!("Invalid template data: {}", e)))?;
            Ok(body.template_data)
        })
    }

    fn save(&self, id: &str, elements: &[Element]) -> BoxFuture<'_, StorageResult<()>> {
        let url = self.endpoint(id);
        let request = SaveTemplateRequest {
            elements: elements.to_vec(),
            is_saved_template: true,
        };
        Box::pin(async move {
            let url = url?;
            self.client
                .put(url.clone())
                .json(&request)
                .send()
                .await
                .map_err(|e| StorageError::Http(format!("PUT {} failed: {}", url, e)))?
                .error_for_status()
                .map_err(|e| StorageError::Http(e.to_string()))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Geometry;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let store = HttpStore::with_client(reqwest::Client::new(), "http://localhost:3030/");
        assert_eq!(
            store.endpoint("cert-42").unwrap().as_str(),
            "http://localhost:3030/api/certificates/cert-42/template-data"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = HttpStore::with_client(reqwest::Client::new(), "http://localhost/certink/");
        assert_eq!(
            store.endpoint("cert-42").unwrap().as_str(),
            "http://localhost/certink/api/certificates/cert-42/template-data"
        );
    }

    #[test]
    fn test_endpoint_escapes_id() {
        let store = HttpStore::with_client(reqwest::Client::new(), "http://h");
        assert_eq!(
            store.endpoint("ISO/2024?x#1").unwrap().as_str(),
            "http://h/api/certificates/ISO%2F2024%3Fx%231/template-data"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let store = HttpStore::with_client(reqwest::Client::new(), "not a url");
        assert!(matches!(store.endpoint("cert-1"), Err(StorageError::Http(_))));
    }

    #[test]
    fn test_response_shape() {
        let json = r#"{"template_data":{"elements":[{"id":"title","kind":"text","content":"Hi",
            "geometry":{"x":1,"y":2,"width":3,"height":4},"style":{}}],"is_saved_template":true}}"#;
        let body: TemplateDataResponse = serde_json::from_str(json).unwrap();
        assert!(body.template_data.is_saved_template);
        assert_eq!(
            body.template_data.elements,
            vec![Element::text("title", "Hi", Geometry::new(1.0, 2.0, 3.0, 4.0))]
        );
    }

    #[test]
    fn test_response_without_flag_is_unsaved() {
        let body: TemplateDataResponse =
            serde_json::from_str(r#"{"template_data":{"elements":[]}}"#).unwrap();
        assert!(!body.template_data.is_saved_template);
    }
}
