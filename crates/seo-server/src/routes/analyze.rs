//! Text analysis endpoint.

use axum::{Json, Router, extract::State, routing::post};
use seo_core::{AnalysisReport, DocumentInput};
use serde::{Deserialize, Serialize};

use crate::config::LlmProvider;
use crate::error::{ApiError, ApiResult};
use crate::refine::{self, DualComparison, RefineOptions};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub provider: Option<LlmProvider>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub strict_model: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisReport,
    /// Present when both providers are compared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_comparison: Option<DualComparison>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/analyze-text
async fn analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let min_chars = state.config().min_text_chars;
    if request.text.trim().chars().count() < min_chars {
        return Err(ApiError::BadRequest(format!(
            "Tekst mora imati najmanje {min_chars} karaktera za analizu"
        )));
    }

    let mut input = DocumentInput::new(request.text);
    if let Some(title) = request.title.filter(|t| !t.trim().is_empty()) {
        input = input.with_title(title);
    }

    let analysis = state.analyzer().analyze(&input);
    let context = analysis.seo_context();
    let llm = &state.config().llm;

    let options = RefineOptions {
        provider: request.provider,
        model: request.model,
        strict_model: request.strict_model,
    };
    let refiner = match refine::select_refiner(llm, state.llm_client(), &options) {
        Ok(refiner) => refiner,
        Err(err) if llm.required => return Err(err.into()),
        Err(err) => {
            tracing::warn!(error = %err, "refiner unavailable, using deterministic output");
            None
        }
    };

    let (seo, source) = refine::refine_or_fallback(
        refiner.as_deref(),
        &analysis.deterministic_seo,
        &context,
        state.lexicon(),
        llm.required,
    )
    .await?;

    let llm_comparison = if llm.dual {
        Some(
            refine::compare_providers(
                llm,
                state.llm_client(),
                &analysis.deterministic_seo,
                &context,
                state.lexicon(),
            )
            .await,
        )
    } else {
        None
    };

    tracing::info!(
        words = analysis.tfidf.total_words,
        intent = analysis.intent.intent_type.as_str(),
        keywords = analysis.keyword_terms.len(),
        source = ?source,
        "text analyzed"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        data: analysis.finish(seo, source),
        llm_comparison,
    }))
}

/// Build analysis routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/analyze-text", post(analyze_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::routes::{build_router, test_support};
    use http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    const ARTICLE: &str = "Domaći hleb se pravi od brašna, vode, soli i kvasca. \
        Kako napraviti domaći hleb kod kuće? Vodič kroz mešenje testa pokazuje da \
        je strpljenje važno, jer testo mora da naraste pre pečenja u rerni.";

    async fn post_analyze(config: ServerConfig, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = build_router(test_support::state_with(config))
            .oneshot(test_support::json_request("POST", "/api/analyze-text", &body))
            .await
            .unwrap();
        let status = response.status();
        (status, test_support::body_json(response).await)
    }

    #[tokio::test]
    async fn short_text_is_rejected() {
        let (status, body) =
            post_analyze(ServerConfig::default(), json!({"text": "   prekratko   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"]["message"],
            "Tekst mora imati najmanje 50 karaktera za analizu"
        );
    }

    #[tokio::test]
    async fn deterministic_report_without_provider() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            json!({"text": ARTICLE, "title": "Domaći hleb"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["seoSource"]["kind"], "deterministic");
        assert!(data["tfidfAnalysis"]["totalWords"].as_u64().unwrap() > 0);
        assert!(data["prioritizedKeywords"]["items"].is_array());
        assert!(data["seoOutputs"]["title"].as_str().unwrap().chars().count() <= 60);
        assert!(data["seoOutputs"]["metaDescription"].as_str().unwrap().chars().count() <= 160);
        assert!(body.get("llmComparison").is_none());
    }

    #[tokio::test]
    async fn missing_key_falls_back_unless_required() {
        let mut config = ServerConfig::default();
        config.llm.provider = Some(LlmProvider::Gemini);
        let (status, body) = post_analyze(config.clone(), json!({"text": ARTICLE})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["seoSource"]["kind"], "deterministic");

        config.llm.required = true;
        let (status, body) = post_analyze(config, json!({"text": ARTICLE})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_FAILED");
        assert_eq!(body["error"]["message"], "GEMINI_API_KEY missing");
    }

    #[tokio::test]
    async fn required_without_provider_fails() {
        let mut config = ServerConfig::default();
        config.llm.required = true;
        let (status, _) = post_analyze(config, json!({"text": ARTICLE})).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn dual_mode_adds_comparison() {
        let mut config = ServerConfig::default();
        config.llm.dual = true;
        let (status, body) = post_analyze(config, json!({"text": ARTICLE})).await;
        assert_eq!(status, StatusCode::OK);
        let comparison = &body["llmComparison"];
        assert_eq!(comparison["geminiError"], "GEMINI_API_KEY missing");
        assert_eq!(comparison["openaiError"], "OPENAI_API_KEY missing");
    }
}
