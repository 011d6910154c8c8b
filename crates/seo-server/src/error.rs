//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::extract::ExtractError;
use crate::refine::RefineError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("{0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500).
    #[error("{0}")]
    Internal(String),

    /// Content extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Model refinement failed while it was required.
    #[error(transparent)]
    Refine(#[from] RefineError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Extract(e) => match e {
                ExtractError::InvalidUrl(_) => "INVALID_URL",
                ExtractError::Unreachable(_) => "SITE_UNREACHABLE",
                ExtractError::Timeout => "TIMEOUT",
                ExtractError::Status(_) | ExtractError::Http(_) => "EXTRACTION_FAILED",
            },
            Self::Refine(_) => "LLM_FAILED",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Extract(e) => match e {
                ExtractError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ExtractError::Unreachable(_) => StatusCode::NOT_FOUND,
                ExtractError::Timeout => StatusCode::REQUEST_TIMEOUT,
                ExtractError::Status(_) | ExtractError::Http(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Refine(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            success: false,
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
