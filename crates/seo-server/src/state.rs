//! Application state shared across handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use seo_analysis::{Analyzer, Lexicon};

use crate::config::{ConfigError, ServerConfig};
use crate::extract::HttpExtractor;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Deterministic analysis pipeline.
    analyzer: Analyzer,
    /// Article fetcher.
    extractor: HttpExtractor,
    /// Client for model providers.
    llm_client: reqwest::Client,
    started_at: Instant,
}

impl AppState {
    /// Create new application state, loading the configured lexicon.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let lexicon = match config.lexicon_path.as_deref() {
            Some(path) => load_lexicon(path)?,
            None => Lexicon::serbian(),
        };
        Self::with_analyzer(config, Analyzer::new(Arc::new(lexicon)))
    }

    /// Create application state around an existing analyzer.
    pub fn with_analyzer(config: ServerConfig, analyzer: Analyzer) -> Result<Self, ConfigError> {
        let extractor =
            HttpExtractor::new().map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let llm_client = reqwest::Client::builder()
            .timeout(config.llm.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            analyzer,
            extractor,
            llm_client,
            started_at: Instant::now(),
        })
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.analyzer.lexicon()
    }

    pub fn extractor(&self) -> &HttpExtractor {
        &self.extractor
    }

    pub fn llm_client(&self) -> &reqwest::Client {
        &self.llm_client
    }

    /// Whole seconds since the state was created.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read and validate a JSON lexicon file.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, ConfigError> {
    let failed = |reason: String| ConfigError::Lexicon {
        path: path.display().to_string(),
        reason,
    };
    let json = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let lexicon = Lexicon::from_json(&json).map_err(|e| failed(e.to_string()))?;
    tracing::info!(path = %path.display(), "loaded custom lexicon");
    Ok(lexicon)
}
