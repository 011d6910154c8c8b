//! External language-model refinement of the deterministic SEO bundle.
//!
//! A [`SeoRefiner`] turns a prompt into raw model text. The functions here
//! build the prompt from an analysis, parse and sanitize the answer, and decide
//! whether a failure falls back to the deterministic bundle or fails the
//! request.

mod gemini;
mod openai;
pub mod parse;
pub mod prompt;

pub use gemini::{GeminiRefiner, gemini_model_chain};
pub use openai::OpenAiRefiner;
pub use parse::{KeywordBrief, json_slice, parse_model_output, sanitize_keywords};
pub use prompt::{SYSTEM_PROMPT, build_prompt};

use async_trait::async_trait;
use seo_analysis::Lexicon;
use seo_core::{SeoContext, SeoOutputs, SeoSource};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{LlmConfig, LlmProvider};

/// Errors from the refinement collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    /// The provider has no API key configured.
    #[error("{0} missing")]
    MissingApiKey(&'static str),

    /// Refinement is required but no provider is selected.
    #[error("LLM refinement is required but no provider is configured")]
    NotConfigured,

    /// The request did not complete.
    #[error("{model} request failed: {message}")]
    Request { model: String, message: String },

    /// The provider answered with a non-success status.
    #[error("{model} returned HTTP {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },

    /// The provider answer could not be decoded.
    #[error("{model} response invalid: {message}")]
    InvalidResponse { model: String, message: String },

    /// The model returned no text.
    #[error("Empty LLM response")]
    EmptyResponse,

    /// Nothing usable could be read from the model text.
    #[error("{model} answer contained no SEO fields")]
    Unusable { model: String },
}

/// Raw model answer and the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub model: String,
    pub text: String,
}

/// A language model that can answer a refinement prompt.
#[async_trait]
pub trait SeoRefiner: Send + Sync {
    fn provider(&self) -> LlmProvider;

    /// Model asked first.
    fn model(&self) -> &str;

    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, RefineError>;
}

/// Per-request overrides of the configured refinement settings.
#[derive(Debug, Clone, Default)]
pub struct RefineOptions {
    pub provider: Option<LlmProvider>,
    pub model: Option<String>,
    pub strict_model: Option<bool>,
}

/// Picks the refiner for a request.
///
/// An explicit model decides the provider; otherwise the request provider,
/// then the configured one. `Ok(None)` means refinement is disabled.
pub fn select_refiner(
    config: &LlmConfig,
    client: &reqwest::Client,
    options: &RefineOptions,
) -> Result<Option<Box<dyn SeoRefiner>>, RefineError> {
    let model = options.model.as_deref().filter(|m| !m.trim().is_empty());
    let provider = match model {
        Some(m) => Some(LlmProvider::for_model(m)),
        None => options.provider.or(config.provider),
    };
    let Some(provider) = provider else {
        return Ok(None);
    };
    let strict = options.strict_model.unwrap_or(config.strict_model);
    build_refiner(config, client, provider, model, strict).map(Some)
}

/// Builds the refiner for `provider`, using its configured model unless `model` is set.
pub fn build_refiner(
    config: &LlmConfig,
    client: &reqwest::Client,
    provider: LlmProvider,
    model: Option<&str>,
    strict_model: bool,
) -> Result<Box<dyn SeoRefiner>, RefineError> {
    let model = model.unwrap_or_else(|| config.model_for(provider)).to_string();
    let key = config
        .api_key_for(provider)
        .ok_or(RefineError::MissingApiKey(api_key_var(provider)))?
        .to_string();

    Ok(match provider {
        LlmProvider::OpenAi => Box::new(OpenAiRefiner::new(
            client.clone(),
            &config.openai_base_url,
            key,
            model,
        )),
        LlmProvider::Gemini => Box::new(GeminiRefiner::new(
            client.clone(),
            &config.gemini_base_url,
            key,
            model,
            strict_model,
        )),
    })
}

/// Environment variable holding the key for `provider`.
pub fn api_key_var(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAi => "OPENAI_API_KEY",
        LlmProvider::Gemini => "GEMINI_API_KEY",
    }
}

/// Asks `refiner` for a better bundle.
///
/// Fields the model leaves out keep their `fallback` values. An answer that
/// changes nothing counts as a failure.
pub async fn refine(
    refiner: &dyn SeoRefiner,
    fallback: &SeoOutputs,
    context: &SeoContext,
    lexicon: &Lexicon,
) -> Result<(SeoOutputs, SeoSource), RefineError> {
    let prompt = build_prompt(context);
    let completion = refiner.complete(SYSTEM_PROMPT, &prompt).await?;
    if completion.text.trim().is_empty() {
        return Err(RefineError::EmptyResponse);
    }
    info!(
        provider = %refiner.provider(),
        model = %completion.model,
        chars = completion.text.len(),
        "model answered"
    );

    let brief = KeywordBrief::from_context(context);
    let seo = parse_model_output(&completion.text, fallback, &brief, lexicon);
    if &seo == fallback {
        return Err(RefineError::Unusable {
            model: completion.model,
        });
    }
    let source = SeoSource::Llm {
        provider: refiner.provider().to_string(),
        model: completion.model,
    };
    Ok((seo, source))
}

/// Refines when a refiner is available, else keeps `fallback`.
///
/// With `required`, a missing refiner or a failed call is an error; otherwise
/// `fallback` is returned unchanged.
pub async fn refine_or_fallback(
    refiner: Option<&dyn SeoRefiner>,
    fallback: &SeoOutputs,
    context: &SeoContext,
    lexicon: &Lexicon,
    required: bool,
) -> Result<(SeoOutputs, SeoSource), RefineError> {
    let Some(refiner) = refiner else {
        if required {
            return Err(RefineError::NotConfigured);
        }
        return Ok((fallback.clone(), SeoSource::Deterministic));
    };

    match refine(refiner, fallback, context, lexicon).await {
        Ok(refined) => Ok(refined),
        Err(err) if required => Err(err),
        Err(err) => {
            warn!(provider = %refiner.provider(), error = %err, "refinement failed, using deterministic output");
            Ok((fallback.clone(), SeoSource::Deterministic))
        }
    }
}

/// Results of asking both providers for the same document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualComparison {
    pub gemini: Option<SeoOutputs>,
    pub openai: Option<SeoOutputs>,
    pub gemini_model: String,
    pub openai_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_error: Option<String>,
}

/// Refines with both providers concurrently using their configured models.
pub async fn compare_providers(
    config: &LlmConfig,
    client: &reqwest::Client,
    fallback: &SeoOutputs,
    context: &SeoContext,
    lexicon: &Lexicon,
) -> DualComparison {
    let run = move |provider: LlmProvider| async move {
        match build_refiner(config, client, provider, None, config.strict_model) {
            Ok(refiner) => refine(refiner.as_ref(), fallback, context, lexicon)
                .await
                .map(|(seo, _)| seo),
            Err(err) => Err(err),
        }
    };

    let (gemini, openai) = futures::join!(run(LlmProvider::Gemini), run(LlmProvider::OpenAi));
    info!(
        gemini = gemini.is_ok(),
        openai = openai.is_ok(),
        "dual refinement finished"
    );

    let (gemini, gemini_error) = split(gemini);
    let (openai, openai_error) = split(openai);
    DualComparison {
        gemini,
        openai,
        gemini_model: config.gemini_model.clone(),
        openai_model: config.openai_model.clone(),
        gemini_error,
        openai_error,
    }
}

fn split(result: Result<SeoOutputs, RefineError>) -> (Option<SeoOutputs>, Option<String>) {
    match result {
        Ok(seo) => (Some(seo), None),
        Err(err) => (None, Some(err.to_string())),
    }
}
