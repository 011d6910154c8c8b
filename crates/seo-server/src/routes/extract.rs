//! Article extraction endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use seo_core::ExtractedContent;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Query and body shape of an extraction request.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ExtractRequest {
    fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/extract-content?url=
async fn extract_get(
    State(state): State<AppState>,
    Query(request): Query<ExtractRequest>,
) -> ApiResult<Json<ExtractedContent>> {
    let url = request
        .url()
        .ok_or_else(|| ApiError::BadRequest("Parametar \"url\" je obavezan".to_string()))?;
    fetch(&state, url).await
}

/// POST /api/extract-content
async fn extract_post(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> ApiResult<Json<ExtractedContent>> {
    let url = request
        .url()
        .ok_or_else(|| ApiError::BadRequest("URL je obavezan parametar".to_string()))?;
    fetch(&state, url).await
}

async fn fetch(state: &AppState, url: &str) -> ApiResult<Json<ExtractedContent>> {
    let content = state.extractor().fetch(url, state.lexicon()).await?;
    Ok(Json(content))
}

/// Build extraction routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/extract-content", get(extract_get).post(extract_post))
}
