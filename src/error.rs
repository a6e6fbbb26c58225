//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type. Each variant maps to an HTTP
//! status, a short error label and a numeric code, and renders as the
//! same JSON envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// Every error response, whatever the route, has this shape:
/// ```json
/// {
///   "error": "Not found",
///   "message": "No todo found",
///   "code": 2001
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error label (e.g. `"Invalid id"`, `"Not found"`).
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    /// Numeric error code.
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status      |
/// |-----------|-----------------|------------------|
/// | 1000–1999 | Validation      | 400 / 404        |
/// | 2000–2999 | Not Found       | 404 Not Found    |
/// | 3000–3999 | Storage         | 400 Bad Request  |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Path identifier is not a well-formed record key.
    #[error("invalid objectID")]
    InvalidId,

    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),

    /// No todo with the given key.
    #[error("No todo found")]
    TodoNotFound,

    /// No user with the given key.
    #[error("No user found")]
    UserNotFound,

    /// Storage layer failure, surfaced as-is.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidId => 1002,
            Self::TodoNotFound => 2001,
            Self::UserNotFound => 2002,
            Self::Storage(_) => 3001,
        }
    }

    /// Returns the short error label for this variant.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidId => "Invalid id",
            Self::Validation(_) => "Validation failed",
            Self::TodoNotFound | Self::UserNotFound => "Not found",
            Self::Storage(_) => "Storage error",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::TodoNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Storage(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for ApiError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Storage(ref message) = self {
            tracing::warn!(%message, "storage call failed");
        }
        let body = ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
            code: self.error_code(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
