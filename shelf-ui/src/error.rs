//! Error types for shelf-ui

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelf_wizard::WizardError;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Wizard rejected the operation
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// shelf-common error
    #[error("Common error: {0}")]
    Common(#[from] shelf_common::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMMON_ERROR"),
            ApiError::Wizard(err) => match err {
                WizardError::ValidationFailed { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED")
                }
                WizardError::CapacityExceeded { .. } => (StatusCode::CONFLICT, "CAPACITY_EXCEEDED"),
                WizardError::UnknownGenre(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_GENRE"),
                WizardError::SearchFailed { .. } => (StatusCode::BAD_GATEWAY, "SEARCH_FAILED"),
                WizardError::NotAPresentedResult { .. } => {
                    (StatusCode::CONFLICT, "NOT_A_PRESENTED_RESULT")
                }
                WizardError::SubmissionFailed(_) => (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED"),
                WizardError::IncompleteProfile(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INCOMPLETE_PROFILE")
                }
                WizardError::NotAtTerminalStep { .. } => {
                    (StatusCode::CONFLICT, "NOT_AT_TERMINAL_STEP")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.parts();

        let message = match &self {
            // The step's own reason is what the user should read
            ApiError::Wizard(WizardError::ValidationFailed { reason, .. }) => reason.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
