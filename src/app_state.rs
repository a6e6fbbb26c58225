//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::Store;
use crate::service::{TodoService, UserService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once at startup around a single [`Store`]; every clone shares
/// the same storage handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Todo service for all todo operations.
    pub todo_service: Arc<TodoService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Storage handle, kept for health reporting and shutdown.
    pub store: Store,
}

impl AppState {
    /// Wires the services around `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            todo_service: Arc::new(TodoService::new(store.clone())),
            user_service: Arc::new(UserService::new(store.clone())),
            store,
        }
    }
}
