//! Command implementations for the seo CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod analyze;
pub mod extract;
pub mod health;

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Analysis with model refinement can take a while.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build the HTTP client.
pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Join `path` onto the server base URL.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Send a request and decode the JSON body, turning error bodies into [`CliError::Server`].
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        Ok(body)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(CliError::Server {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Message of a `{"error": {"message"}}` or `{"error": "..."}` body, else the raw body.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    let error = json.get("error");
    error
        .and_then(|e| e.get("message"))
        .or(error)
        .and_then(|v| v.as_str())
        .unwrap_or(body)
        .to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"success":false,"error":{"code":"BAD_REQUEST","message":"URL je obavezan parametar"}}"#),
            "URL je obavezan parametar"
        );
        assert_eq!(error_message(r#"{"error":"Neispravan format URL-a"}"#), "Neispravan format URL-a");
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("kratko", 10), "kratko");
        assert_eq!(truncate("čćžšđčćžšđ", 6), "čćž...");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("http://localhost:3000/", "/health"), "http://localhost:3000/health");
    }
}
