//! User DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name; required and non-blank.
    #[serde(default)]
    pub username: Option<String>,
}

/// Response body wrapping a single user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// The requested record.
    pub user: User,
}
