//! Server configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Minimum trimmed text length accepted for analysis.
    pub min_text_chars: usize,
    /// Replacement lexicon file.
    pub lexicon_path: Option<PathBuf>,
    /// Model refinement settings.
    pub llm: LlmConfig,
}

/// Settings for the external model refiners.
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider used when a request does not pick one. `None` disables refinement.
    pub provider: Option<LlmProvider>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Fail the request instead of falling back when refinement fails.
    pub required: bool,
    /// Never try fallback models.
    pub strict_model: bool,
    /// Run both providers and report each result.
    pub dual: bool,
    pub timeout: Duration,
}

impl LlmConfig {
    pub const DEFAULT_OPENAI_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_OPENAI_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_GEMINI_MODEL: &'static str = "gemini-2.5-flash";
    pub const DEFAULT_GEMINI_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";

    /// Default model for `provider`.
    pub fn model_for(&self, provider: LlmProvider) -> &str {
        match provider {
            LlmProvider::OpenAi => &self.openai_model,
            LlmProvider::Gemini => &self.gemini_model,
        }
    }

    /// API key for `provider`, if configured.
    pub fn api_key_for(&self, provider: LlmProvider) -> Option<&str> {
        match provider {
            LlmProvider::OpenAi => self.openai_api_key.as_deref(),
            LlmProvider::Gemini => self.gemini_api_key.as_deref(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            openai_api_key: None,
            openai_model: Self::DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: Self::DEFAULT_OPENAI_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: Self::DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: Self::DEFAULT_GEMINI_BASE_URL.to_string(),
            required: false,
            strict_model: false,
            dual: false,
            timeout: Duration::from_secs(30),
        }
    }
}

// API keys stay out of logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("has_openai_key", &self.openai_api_key.is_some())
            .field("gemini_model", &self.gemini_model)
            .field("has_gemini_key", &self.gemini_api_key.is_some())
            .field("required", &self.required)
            .field("strict_model", &self.strict_model)
            .field("dual", &self.dual)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// External model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Provider serving `model`: OpenAI for `gpt-`, `o1-` and `o3-` models, else Gemini.
    pub fn for_model(model: &str) -> Self {
        if ["gpt-", "o1-", "o3-"].iter().any(|p| model.starts_with(p)) {
            Self::OpenAi
        } else {
            Self::Gemini
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(format!("unknown provider '{other}' (expected openai or gemini)")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "text" or "json" (default: "text")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `MIN_TEXT_CHARS`: Minimum analyzable text length (default: 50)
    /// - `SEO_LEXICON_PATH`: JSON lexicon replacing the built-in one
    /// - `SEO_LLM_PROVIDER`: "openai" or "gemini" (default: refinement disabled)
    /// - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// - `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`
    /// - `SEO_LLM_REQUIRED`, `SEO_LLM_STRICT_MODEL`, `SEO_DUAL_LLM`: booleans
    /// - `SEO_LLM_TIMEOUT_SECS`: Provider timeout (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = parse_or(&var, "PORT", 3000)?;
        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_format = parse_or(&var, "LOG_FORMAT", LogFormat::Text)?;
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());
        let min_text_chars = parse_or(&var, "MIN_TEXT_CHARS", 50)?;
        let lexicon_path = var("SEO_LEXICON_PATH").map(PathBuf::from);

        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            provider: var("SEO_LLM_PROVIDER")
                .map(|v| parse_value("SEO_LLM_PROVIDER", &v))
                .transpose()?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            required: parse_bool(&var, "SEO_LLM_REQUIRED")?,
            strict_model: parse_bool(&var, "SEO_LLM_STRICT_MODEL")?,
            dual: parse_bool(&var, "SEO_DUAL_LLM")?,
            timeout: Duration::from_secs(parse_or(&var, "SEO_LLM_TIMEOUT_SECS", 30)?),
        };

        Ok(Self {
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            min_text_chars,
            lexicon_path,
            llm,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            cors_allowed_origins: "*".to_string(),
            min_text_chars: 50,
            lexicon_path: None,
            llm: LlmConfig::default(),
        }
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T, F>(var: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_bool<F>(var: &F, name: &str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name).map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("false" | "0" | "no" | "off") => Ok(false),
        Some("true" | "1" | "yes" | "on") => Ok(true),
        Some(other) => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    /// The configured lexicon file could not be used.
    #[error("failed to load lexicon from {path}: {reason}")]
    Lexicon { path: String, reason: String },

    /// An outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
