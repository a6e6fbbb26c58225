//! Todo service: orchestrates todo operations over the record store.

use chrono::Utc;

use crate::domain::{NewTodo, RecordId, Todo, TodoPatch};
use crate::error::ApiError;
use crate::persistence::Store;

/// Orchestration layer for all todo operations.
///
/// Stateless coordinator over a shared [`Store`]. Every method issues
/// exactly one storage call and maps a missing record to
/// [`ApiError::TodoNotFound`].
#[derive(Debug, Clone)]
pub struct TodoService {
    store: Store,
}

impl TodoService {
    /// Creates a new `TodoService`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns a reference to the inner [`Store`].
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Creates a todo from raw text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for missing or blank text, or
    /// [`ApiError::Storage`] if the insert fails.
    pub async fn create_todo(&self, text: Option<&str>) -> Result<Todo, ApiError> {
        let text = text.ok_or_else(|| ApiError::Validation("text is required".to_string()))?;
        let todo = self.store.insert_todo(NewTodo::new(text)?).await?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Returns every todo, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the query fails.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.store.list_todos().await
    }

    /// Fetches one todo.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TodoNotFound`] if no todo has this key.
    pub async fn get_todo(&self, id: RecordId) -> Result<Todo, ApiError> {
        self.store
            .find_todo(id)
            .await?
            .ok_or(ApiError::TodoNotFound)
    }

    /// Deletes one todo and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TodoNotFound`] if no todo has this key.
    pub async fn delete_todo(&self, id: RecordId) -> Result<Todo, ApiError> {
        let todo = self
            .store
            .remove_todo(id)
            .await?
            .ok_or(ApiError::TodoNotFound)?;
        tracing::info!(%id, "todo deleted");
        Ok(todo)
    }

    /// Applies a partial update using the current time for `completedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for blank replacement text, or
    /// [`ApiError::TodoNotFound`] if no todo has this key.
    pub async fn update_todo(&self, id: RecordId, patch: TodoPatch) -> Result<Todo, ApiError> {
        let changes = patch.resolve(Utc::now().timestamp_millis())?;
        let completed = changes.completed;
        let todo = self
            .store
            .update_todo(id, changes)
            .await?
            .ok_or(ApiError::TodoNotFound)?;
        tracing::info!(%id, completed, "todo updated");
        Ok(todo)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_service() -> TodoService {
        TodoService::new(Store::memory())
    }

    async fn todo_count(service: &TodoService) -> usize {
        let Store::Memory(store) = service.store() else {
            panic!("expected memory store");
        };
        store.todo_count().await
    }

    #[tokio::test]
    async fn create_returns_open_todo() {
        let service = make_service();
        let Ok(todo) = service.create_todo(Some("Test todo text")).await else {
            panic!("create failed");
        };
        assert_eq!(todo.text, "Test todo text");
        assert!(!todo.completed);
        assert_eq!(todo.completed_at, None);
    }

    #[tokio::test]
    async fn create_without_text_stores_nothing() {
        let service = make_service();
        let result = service.create_todo(None).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(todo_count(&service).await, 0);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let service = make_service();
        let result = service.get_todo(RecordId::new()).await;
        assert!(matches!(result, Err(ApiError::TodoNotFound)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = make_service();
        let Ok(todo) = service.create_todo(Some("short lived")).await else {
            panic!("create failed");
        };

        let deleted = service.delete_todo(todo.id).await;
        assert_eq!(deleted.ok(), Some(todo.clone()));

        let result = service.get_todo(todo.id).await;
        assert!(matches!(result, Err(ApiError::TodoNotFound)));
    }

    #[tokio::test]
    async fn update_completes_with_current_time() {
        let service = make_service();
        let Ok(todo) = service.create_todo(Some("finish me")).await else {
            panic!("create failed");
        };
        let before = Utc::now().timestamp_millis();

        let patch = TodoPatch {
            text: None,
            completed: true,
        };
        let Ok(updated) = service.update_todo(todo.id, patch).await else {
            panic!("update failed");
        };
        assert!(updated.completed);
        let Some(at) = updated.completed_at else {
            panic!("completedAt missing");
        };
        assert!(at >= before);
    }

    #[tokio::test]
    async fn update_unknown_is_not_found() {
        let service = make_service();
        let result = service.update_todo(RecordId::new(), TodoPatch::default()).await;
        assert!(matches!(result, Err(ApiError::TodoNotFound)));
    }
}
