//! Provider self-check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use seo_analysis::{SynthesisInput, build_deterministic_seo};
use seo_core::{IntentType, SeoContext, SeoOutputs, SeoSource};
use serde::Serialize;

use crate::config::LlmProvider;
use crate::refine;
use crate::routes::health::EnvSummary;
use crate::state::AppState;

const SAMPLE_TEXT: &str =
    "Ovo je kratak test sadržaj za proveru LLM generisanja naslova i meta opisa na srpskom jeziku.";
const SAMPLE_TITLE: &str = "Test naslov";
const SAMPLE_KEY_TERMS: [&str; 3] = ["test sadržaj", "srpski jezik", "seo generisanje"];
const SAMPLE_TOPIC: &str = "seo test";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckResponse {
    pub env: EnvSummary,
    /// Deterministic bundle for the sample document.
    pub deterministic: SeoOutputs,
    pub checks: Vec<ProviderCheck>,
}

/// Outcome of one provider probe.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCheck {
    /// The probe ran; false when the provider could not be set up.
    pub ok: bool,
    pub provider: LlmProvider,
    pub model: String,
    /// The model answer changed the deterministic bundle.
    pub used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoOutputs>,
}

fn sample_context() -> SeoContext {
    SeoContext {
        document_title: Some(SAMPLE_TITLE.to_string()),
        key_terms: SAMPLE_KEY_TERMS.iter().map(|s| s.to_string()).collect(),
        main_topics: vec![SAMPLE_TOPIC.to_string()],
        search_intent_type: Some(IntentType::Informational),
        text_sample: SAMPLE_TEXT.to_string(),
    }
}

fn sample_bundle(context: &SeoContext) -> SeoOutputs {
    build_deterministic_seo(SynthesisInput {
        title: context.document_title.as_deref(),
        key_terms: &context.key_terms,
        main_topics: &context.main_topics,
    })
}

async fn probe(
    state: &AppState,
    provider: LlmProvider,
    fallback: &SeoOutputs,
    context: &SeoContext,
) -> ProviderCheck {
    let llm = &state.config().llm;
    let model = llm.model_for(provider).to_string();
    let refiner = match refine::build_refiner(llm, state.llm_client(), provider, None, false) {
        Ok(refiner) => refiner,
        Err(err) => {
            return ProviderCheck {
                ok: false,
                provider,
                model,
                used: false,
                error: Some(err.to_string()),
                seo: None,
            };
        }
    };

    match refine::refine(refiner.as_ref(), fallback, context, state.lexicon()).await {
        Ok((seo, source)) => ProviderCheck {
            ok: true,
            provider,
            model: match source {
                SeoSource::Llm { model, .. } => model,
                SeoSource::Deterministic => model,
            },
            used: &seo != fallback,
            error: None,
            seo: Some(seo),
        },
        Err(err) => ProviderCheck {
            ok: true,
            provider,
            model,
            used: false,
            error: Some(err.to_string()),
            seo: None,
        },
    }
}

/// GET /api/self-check
async fn self_check(State(state): State<AppState>) -> Json<SelfCheckResponse> {
    let context = sample_context();
    let deterministic = sample_bundle(&context);

    let (gemini, openai) = futures::join!(
        probe(&state, LlmProvider::Gemini, &deterministic, &context),
        probe(&state, LlmProvider::OpenAi, &deterministic, &context),
    );
    tracing::info!(gemini = gemini.used, openai = openai.used, "self-check finished");

    Json(SelfCheckResponse {
        env: EnvSummary::from(&state.config().llm),
        deterministic,
        checks: vec![gemini, openai],
    })
}

/// Build self-check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/self-check", get(self_check))
}
