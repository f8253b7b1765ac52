//! Route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use tracing::{error, warn};

use crate::pipeline::Submission;
use crate::web::AppState;

/// Built-in landing page served when no HTML file is configured.
const FALLBACK_PAGE: &str = r#"<html>
    <head><title>Instant Lead Response System</title></head>
    <body style="font-family: sans-serif; max-width: 600px; margin: 50px auto;">
        <h1>⚡ Instant Lead Response System</h1>
        <p>API is running. Add a landing page file for the full form.</p>
        <p><a href="/stats">View Stats</a></p>
        <p><small>Rule-based classification - no API costs!</small></p>
    </body>
</html>
"#;

/// POST /submit-lead
///
/// Validates the submission at the boundary, then runs the pipeline.
/// Invalid fields → 422 before anything is persisted; pipeline failure → 500.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> impl IntoResponse {
    if let Err(e) = submission.validate() {
        warn!(error = %e, "Rejected invalid submission");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response();
    }

    match state.processor.process(submission).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to process lead");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// GET /stats
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute stats");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /
///
/// Serves the configured landing page file if present, else the fallback.
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    match tokio::fs::read_to_string(&state.landing_page).await {
        Ok(html) => Html(html),
        Err(_) => Html(FALLBACK_PAGE.to_string()),
    }
}
