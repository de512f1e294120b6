//! API error responses
//!
//! External 401 bodies stay coarse ("invalid or expired token"); the
//! granular verification failure is only logged. 403 carries the reason
//! code of the predicate that failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use talentgate_auth::{ForbiddenReason, Rejection, UnauthenticatedReason};
use tracing::error;

/// Errors surfaced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing authorization header")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Service name mismatch")]
    ServiceNameMismatch,
    #[error("Unknown service")]
    UnknownService,
    #[error("Forbidden: {}", .0.code())]
    Forbidden(ForbiddenReason),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Token creation failed")]
    TokenCreation,
    #[error("Database error: {0}")]
    Database(String),
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Unauthenticated(UnauthenticatedReason::MissingToken) => {
                ApiError::MissingToken
            }
            Rejection::Unauthenticated(UnauthenticatedReason::InvalidToken) => {
                ApiError::InvalidToken
            }
            Rejection::Unauthenticated(UnauthenticatedReason::ServiceNameMismatch) => {
                ApiError::ServiceNameMismatch
            }
            Rejection::Unauthenticated(UnauthenticatedReason::UnknownService) => {
                ApiError::UnknownService
            }
            Rejection::Forbidden(reason) => ApiError::Forbidden(reason),
        }
    }
}

impl From<talentgate_auth::IssueError> for ApiError {
    fn from(e: talentgate_auth::IssueError) -> Self {
        error!("Token minting failed: {}", e);
        ApiError::TokenCreation
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing_token",
                "Authorization is required".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired token".to_string(),
            ),
            ApiError::ServiceNameMismatch => (
                StatusCode::UNAUTHORIZED,
                "service_name_mismatch",
                "Service name does not match the presented token".to_string(),
            ),
            ApiError::UnknownService => (
                StatusCode::UNAUTHORIZED,
                "unknown_service",
                "Calling service is not recognized".to_string(),
            ),
            ApiError::Forbidden(reason) => (
                StatusCode::FORBIDDEN,
                reason.code(),
                "Insufficient permissions for this operation".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password".to_string(),
            ),
            ApiError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "duplicate_email",
                "Email is already registered".to_string(),
            ),
            ApiError::NotFound(what) => {
                (StatusCode::NOT_FOUND, "not_found", format!("{} not found", what))
            }
            ApiError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, "validation_failed", detail.clone())
            }
            ApiError::TokenCreation => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_creation_failed",
                "Failed to create authentication token".to_string(),
            ),
            ApiError::Database(detail) => {
                error!("Database error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
