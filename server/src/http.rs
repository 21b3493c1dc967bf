use std::path::Path;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use nexora_shared::protocol::{ContactAck, ContactSubmission, CONTACT_PATH};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::submissions::SubmissionLog;

/// Shared app state passed to each handler
#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionLog,
}

/// Prefix of every API route. Unknown paths under it are 404s.
pub const API_PREFIX: &str = "/api";

/// Contact endpoint plus static assets from `dist_dir`. Non-API paths that
/// match no file get `index.html` so client-side routes load the page.
pub fn build_router(state: AppState, dist_dir: &Path) -> Router {
    let index = ServeFile::new(dist_dir.join("index.html"));
    let assets = ServeDir::new(dist_dir).fallback(index);

    let contact = CONTACT_PATH
        .strip_prefix(API_PREFIX)
        .unwrap_or(CONTACT_PATH);
    let api = Router::new()
        .route(contact, post(contact_handler))
        .fallback(api_not_found);

    Router::new()
        .nest(API_PREFIX, api)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Store the posted body and acknowledge. The acknowledgment is the same
/// whether or not the append succeeded.
pub async fn contact_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<ContactAck> {
    tracing::info!("Contact form submission: {}", body);

    if let Err(e) = serde_json::from_value::<ContactSubmission>(body.clone()) {
        tracing::warn!("Submission does not match the contact form shape: {}", e);
    }

    match state.submissions.append(body).await {
        Ok(bytes) => tracing::debug!("Appended {} bytes to submissions file", bytes),
        Err(e) => tracing::error!("Contact submission was not stored: {}", e),
    }

    Json(ContactAck::accepted())
}

async fn api_not_found(uri: Uri) -> StatusCode {
    tracing::debug!("No API route for {}", uri);
    StatusCode::NOT_FOUND
}
