//! Persistence layer: the record store handle and its backends.
//!
//! [`Store`] is constructed once at startup and cloned into every request
//! through the application state. It dispatches to either the in-process
//! [`MemoryStore`] or the PostgreSQL-backed [`PostgresStore`]. Each
//! method is exactly one storage call.

pub mod memory;
pub mod models;
pub mod postgres;

use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::domain::{NewTodo, NewUser, RecordId, Todo, TodoChanges, User};
use crate::error::ApiError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Shared handle to the configured record store.
#[derive(Debug, Clone)]
pub enum Store {
    /// Volatile in-process maps.
    Memory(Arc<MemoryStore>),
    /// PostgreSQL connection pool.
    Postgres(PostgresStore),
}

impl Store {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    /// Acquires the backend selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the database cannot be reached or
    /// migrations fail.
    pub async fn connect(config: &AppConfig) -> Result<Self, ApiError> {
        match &config.storage_backend {
            StorageBackend::Memory => Ok(Self::memory()),
            StorageBackend::Postgres { database_url } => Ok(Self::Postgres(
                PostgresStore::connect(database_url, config).await?,
            )),
        }
    }

    /// Short name of the active backend.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Inserts a todo; storage assigns the key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn insert_todo(&self, new: NewTodo) -> Result<Todo, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.insert_todo(new).await),
            Self::Postgres(store) => store.insert_todo(new).await,
        }
    }

    /// Returns every todo, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.list_todos().await),
            Self::Postgres(store) => store.list_todos().await,
        }
    }

    /// Looks up a todo by key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn find_todo(&self, id: RecordId) -> Result<Option<Todo>, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.find_todo(id).await),
            Self::Postgres(store) => store.find_todo(id).await,
        }
    }

    /// Deletes a todo by key, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn remove_todo(&self, id: RecordId) -> Result<Option<Todo>, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.remove_todo(id).await),
            Self::Postgres(store) => store.remove_todo(id).await,
        }
    }

    /// Applies resolved changes to a todo, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn update_todo(
        &self,
        id: RecordId,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.update_todo(id, changes).await),
            Self::Postgres(store) => store.update_todo(id, changes).await,
        }
    }

    /// Inserts a user; storage assigns the key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn insert_user(&self, new: NewUser) -> Result<User, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.insert_user(new).await),
            Self::Postgres(store) => store.insert_user(new).await,
        }
    }

    /// Looks up a user by key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on backend failure.
    pub async fn find_user(&self, id: RecordId) -> Result<Option<User>, ApiError> {
        match self {
            Self::Memory(store) => Ok(store.find_user(id).await),
            Self::Postgres(store) => store.find_user(id).await,
        }
    }

    /// Releases backend resources. Called once on shutdown.
    pub async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}
