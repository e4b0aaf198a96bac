//! API error handling
//!
//! One taxonomy for every public operation: each service catches its own
//! internal failures and maps them here before they cross the HTTP
//! boundary. Internal detail (store errors, hashing failures) is logged,
//! never rendered to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keygate_core::store::StoreError;
use serde::{Deserialize, Serialize};

/// Client-visible error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Duplicate unique key (email already registered) -> 400
    #[error("{0}")]
    Conflict(String),

    /// No matching record -> 404
    #[error("{0}")]
    NotFound(String),

    /// Missing, invalid, or expired credentials -> 401
    #[error("{0}")]
    Unauthenticated(String),

    /// Token already on the revocation list -> 400
    #[error("Token has already been invalidated")]
    AlreadyRevoked,

    /// Anything not otherwise classified -> 500; detail stays server-side
    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::AlreadyRevoked => (
                StatusCode::BAD_REQUEST,
                "Token has already been invalidated".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => {
                ApiError::Conflict("User has already been registered".to_string())
            }
            StoreError::Backend(detail) => ApiError::Internal(detail),
        }
    }
}
