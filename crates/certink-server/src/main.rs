//! CertInk template server
//!
//! Stores certificate template layouts per document and serves them to the
//! editor.
//!
//! ## Endpoints
//!
//! ```text
//! GET  /api/certificates/{id}/template-data   -> 200 {"template_data": {...}} | 404
//! PUT  /api/certificates/{id}/template-data   <- {"elements": [...]}          -> 204
//! GET  /health                                -> ok
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use certink_core::storage::{SaveTemplateRequest, TemplateDataResponse, TemplateRecord};
use dashmap::DashMap;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Environment variable holding the bind address.
const ADDR_ENV: &str = "CERTINK_SERVER_ADDR";
const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3030);

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
    addr: SocketAddr,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_value(std::env::var(ADDR_ENV).ok().as_deref())
    }

    fn from_value(value: Option<&str>) -> Self {
        let default = SocketAddr::from(DEFAULT_ADDR);
        let addr = match value {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring invalid {}={:?}: {}", ADDR_ENV, raw, e);
                default
            }),
            None => default,
        };
        Self { addr }
    }
}

/// Shared application state
#[derive(Default)]
struct AppState {
    /// Template records keyed by document identifier
    templates: DashMap<String, TemplateRecord>,
}

impl AppState {
    fn new() -> Self {
        Self::default()
    }
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/api/certificates/{id}/template-data",
            get(load_template).put(save_template),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certink_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let app = router(Arc::new(AppState::new()));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };
    info!("CertInk template server listening on {}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

/// Index page
async fn index() -> &'static str {
    "CertInk Template Server - see /api/certificates/{id}/template-data"
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

/// Fetch the stored template of a document
async fn load_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TemplateDataResponse>, StatusCode> {
    match state.templates.get(&id) {
        Some(record) => Ok(Json(TemplateDataResponse {
            template_data: record.clone(),
        })),
        None => {
            info!("No template stored for {}", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Store the template of a document, replacing any previous one
async fn save_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SaveTemplateRequest>,
) -> StatusCode {
    info!("Saving template for {} ({} elements)", id, request.elements.len());
    state.templates.insert(
        id,
        TemplateRecord {
            elements: request.elements,
            is_saved_template: request.is_saved_template,
        },
    );
    StatusCode::NO_CONTENT
}
