//! seo-server: HTTP API for Serbian SEO text analysis
//!
//! This crate provides:
//! - `POST /api/analyze-text`: the full analysis report for submitted text
//! - `GET|POST /api/extract-content`: article extraction from a URL
//! - `GET /api/self-check`: probes of the configured model providers
//! - `GET /health`: liveness and refinement settings
//!
//! The deterministic pipeline lives in `seo-analysis`. This crate adds the
//! external collaborators (page fetching and model refinement) and the
//! middleware stack: request tracing, CORS, request IDs and JSON errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use seo_server::{config::ServerConfig, routes, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let app = routes::build_router(AppState::new(config.clone())?);
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod refine;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, LlmConfig, LlmProvider, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use extract::{ExtractError, HttpExtractor};
pub use refine::{RefineError, SeoRefiner};
pub use state::AppState;

// Re-export dependent crates
pub use seo_analysis;
pub use seo_core;
