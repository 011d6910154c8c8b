//! Gemini `generateContent` refiner with a model fallback chain.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Completion, RefineError, SeoRefiner};
use crate::config::LlmProvider;

const TEMPERATURE: f32 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Models tried in order for `primary`.
///
/// 1.5 pro and flash stand in for each other. 2.x models and strict mode get
/// no fallbacks.
pub fn gemini_model_chain(primary: &str, strict: bool) -> Vec<String> {
    let fallbacks: &[&str] = if strict || primary.starts_with("gemini-2.5-") {
        &[]
    } else if primary.starts_with("gemini-1.5-pro") {
        &["gemini-1.5-flash"]
    } else if primary.starts_with("gemini-1.5-flash") {
        &["gemini-1.5-pro"]
    } else {
        &[]
    };

    std::iter::once(primary)
        .chain(fallbacks.iter().copied().filter(|m| *m != primary))
        .map(str::to_string)
        .collect()
}

pub struct GeminiRefiner {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    strict: bool,
}

impl GeminiRefiner {
    pub fn new(client: Client, base_url: &str, api_key: String, model: String, strict: bool) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            strict,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate(&self, model: &str, body: &GenerateRequest<'_>) -> Result<String, RefineError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| RefineError::Request {
                model: model.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!(model, "Gemini quota exceeded for refinement request");
            }
            return Err(RefineError::Status {
                model: model.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let response: GenerateResponse =
            response
                .json()
                .await
                .map_err(|err| RefineError::InvalidResponse {
                    model: model.to_string(),
                    message: err.to_string(),
                })?;
        Ok(response.text())
    }
}

#[async_trait]
impl SeoRefiner for GeminiRefiner {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    // Prompts are sent as one user turn; `system` is prepended.
    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, RefineError> {
        let text = format!("{system}\n\n{prompt}");
        let body = GenerateRequest::new(&text);

        let mut last_error = RefineError::EmptyResponse;
        for model in gemini_model_chain(&self.model, self.strict) {
            debug!(model = %model, "requesting Gemini completion");
            match self.generate(&model, &body).await {
                Ok(text) if !text.trim().is_empty() => return Ok(Completion { model, text }),
                Ok(_) => last_error = RefineError::EmptyResponse,
                Err(err) => {
                    warn!(model = %model, error = %err, "Gemini model failed");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first candidate's parts, concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
