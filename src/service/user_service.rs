//! User service.

use crate::domain::{NewUser, RecordId, User};
use crate::error::ApiError;
use crate::persistence::Store;

/// Orchestration layer for user operations.
#[derive(Debug, Clone)]
pub struct UserService {
    store: Store,
}

impl UserService {
    /// Creates a new `UserService`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a user from a raw username.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a missing or blank username,
    /// or [`ApiError::Storage`] if the insert fails.
    pub async fn create_user(&self, username: Option<&str>) -> Result<User, ApiError> {
        let username =
            username.ok_or_else(|| ApiError::Validation("username is required".to_string()))?;
        let user = self.store.insert_user(NewUser::new(username)?).await?;
        tracing::info!(id = %user.id, "user created");
        Ok(user)
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UserNotFound`] if no user has this key.
    pub async fn get_user(&self, id: RecordId) -> Result<User, ApiError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}
