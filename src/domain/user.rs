//! User record.

use serde::Serialize;
use utoipa::ToSchema;

use super::RecordId;
use crate::error::ApiError;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    /// Record key assigned by storage.
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "5a0b1c2d3e4f5a6b7c8d9e0f")]
    pub id: RecordId,
    /// Display name, never empty.
    pub username: String,
}

/// Validated input for inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Trimmed, non-empty username.
    pub username: String,
}

impl NewUser {
    /// Validates a raw username.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the username is empty after
    /// trimming.
    pub fn new(username: &str) -> Result<Self, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::Validation("username must not be empty".to_string()));
        }
        Ok(Self {
            username: username.to_string(),
        })
    }

    /// Attaches a storage key, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: RecordId) -> User {
        User {
            id,
            username: self.username,
        }
    }
}
