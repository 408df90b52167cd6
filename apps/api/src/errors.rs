use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::llm_client::LlmError;
use crate::storage::StoreError;

/// Message returned for every upstream AI failure. Details stay in the logs.
pub const ANALYSIS_FAILED: &str = "Failed to analyze resume";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Not authenticated")]
    Unauthorized(#[from] AuthError),

    #[error("Failed to analyze resume")]
    Upstream(#[from] LlmError),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Storage(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message surfaced to the caller. Storage errors pass through
    /// verbatim; upstream failures are replaced by a generic text.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(e) => {
                tracing::warn!("Authentication failed: {e}");
                self.to_string()
            }
            AppError::Upstream(e) => {
                tracing::error!("AI gateway error: {e}");
                ANALYSIS_FAILED.to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Database error: {e}");
                e.to_string()
            }
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Error wrapper for the analysis function route, which answers every
/// failure with HTTP 500 and `{"error": message}`.
#[derive(Debug)]
pub struct FunctionError(pub AppError);

impl<E> From<E> for FunctionError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        FunctionError(err.into())
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.0.public_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
