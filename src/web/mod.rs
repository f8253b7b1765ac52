//! HTTP surface — lead submission, stats, landing page, health.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::pipeline::LeadProcessor;
use crate::store::LeadStore;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<LeadProcessor>,
    pub store: Arc<LeadStore>,
    /// Landing page HTML file; the built-in fallback is served if missing.
    pub landing_page: PathBuf,
}

/// Build the service router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/submit-lead", post(handlers::submit_lead))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::landing))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
