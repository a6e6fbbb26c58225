//! REST endpoint handlers organized by resource.

pub mod system;
pub mod todo;
pub mod user;

use axum::Router;

use crate::app_state::AppState;
use crate::domain::RecordId;
use crate::error::ApiError;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(todo::routes()).merge(user::routes())
}

/// Validates a path segment as a record key before any storage call.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] if `raw` is not a well-formed key.
pub fn parse_record_id(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(raw, "rejected malformed record key");
        ApiError::InvalidId
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_id_accepts_either_case() {
        let lower = parse_record_id("5a0b1c2d3e4f5a6b7c8d9e0f").ok();
        let upper = parse_record_id("5A0B1C2D3E4F5A6B7C8D9E0F").ok();
        assert!(lower.is_some());
        assert_eq!(lower, upper);
    }

    #[test]
    fn parse_record_id_rejects_malformed_key() {
        for raw in ["abc12", "abc123", "", "5a0b1c2d3e4f5a6b7c8d9e0z"] {
            assert!(matches!(parse_record_id(raw), Err(ApiError::InvalidId)), "{raw}");
        }
    }
}
