//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::config::LlmConfig;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub uptime_sec: u64,
    /// RFC 3339 timestamp.
    pub server_time: String,
    pub env: EnvSummary,
}

/// Refinement settings, without secrets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvSummary {
    pub provider: Option<String>,
    pub openai_model: String,
    pub gemini_model: String,
    pub strict_model: bool,
    pub required: bool,
    pub dual: bool,
    pub has_keys: HasKeys,
}

#[derive(Debug, Serialize)]
pub struct HasKeys {
    pub openai: bool,
    pub gemini: bool,
}

impl From<&LlmConfig> for EnvSummary {
    fn from(llm: &LlmConfig) -> Self {
        Self {
            provider: llm.provider.map(|p| p.to_string()),
            openai_model: llm.openai_model.clone(),
            gemini_model: llm.gemini_model.clone(),
            strict_model: llm.strict_model,
            required: llm.required,
            dual: llm.dual,
            has_keys: HasKeys {
                openai: llm.openai_api_key.is_some(),
                gemini: llm.gemini_api_key.is_some(),
            },
        }
    }
}

/// GET /health - Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        uptime_sec: state.uptime_secs(),
        server_time: chrono::Utc::now().to_rfc3339(),
        env: EnvSummary::from(&state.config().llm),
    })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
