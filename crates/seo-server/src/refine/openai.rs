//! OpenAI-compatible chat-completions refiner.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Completion, RefineError, SeoRefiner};
use crate::config::LlmProvider;

const TEMPERATURE: f32 = 0.4;
const MAX_COMPLETION_TOKENS: u32 = 2000;
// Reasoning models spend part of the budget before answering.
const REASONING_MAX_COMPLETION_TOKENS: u32 = 8000;

pub struct OpenAiRefiner {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiRefiner {
    pub fn new(client: Client, base_url: &str, api_key: String, model: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
        }
    }

    fn request_body<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatCompletionRequest<'a> {
        // gpt-5 models only accept the default temperature.
        let reasoning = self.model.starts_with("gpt-5");
        ChatCompletionRequest {
            model: &self.model,
            temperature: (!reasoning).then_some(TEMPERATURE),
            max_completion_tokens: if reasoning {
                REASONING_MAX_COMPLETION_TOKENS
            } else {
                MAX_COMPLETION_TOKENS
            },
            response_format: ResponseFormat {
                r#type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

#[async_trait]
impl SeoRefiner for OpenAiRefiner {
    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, RefineError> {
        debug!(model = %self.model, "requesting chat completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system, prompt))
            .send()
            .await
            .map_err(|err| RefineError::Request {
                model: self.model.clone(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!(model = %self.model, "OpenAI rate limited refinement request");
            }
            return Err(RefineError::Status {
                model: self.model.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let response: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|err| RefineError::InvalidResponse {
                    model: self.model.clone(),
                    message: err.to_string(),
                })?;

        let choice = response.choices.into_iter().next();
        debug!(
            model = %self.model,
            finish_reason = ?choice.as_ref().and_then(|c| c.finish_reason.as_deref()),
            "chat completion received"
        );
        let text = choice
            .and_then(|c| c.message.content)
            .and_then(|c| c.as_text())
            .unwrap_or_default();

        Ok(Completion {
            model: self.model.clone(),
            text,
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_completion_tokens: u32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<ChatCompletionContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatCompletionContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl ChatCompletionContent {
    fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Parts(parts) => {
                let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
                (!text.is_empty()).then_some(text)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}
