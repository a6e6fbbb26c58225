//! In-process record store.
//!
//! [`MemoryStore`] keeps each collection in a `BTreeMap` keyed by
//! [`RecordId`] behind a [`tokio::sync::RwLock`]. Keys minted by one
//! process sort in creation order, so listing returns records oldest
//! first without a separate index.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::domain::{NewTodo, NewUser, RecordId, Todo, TodoChanges, User};

/// Volatile store for development and tests.
///
/// # Concurrency
///
/// - Reads on the same collection run concurrently.
/// - Writes to a collection are serialized.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<BTreeMap<RecordId, Todo>>,
    users: RwLock<BTreeMap<RecordId, User>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a todo under a freshly minted key.
    pub async fn insert_todo(&self, new: NewTodo) -> Todo {
        let mut map = self.todos.write().await;
        let mut id = RecordId::new();
        while map.contains_key(&id) {
            id = RecordId::new();
        }
        let todo = new.into_todo(id);
        map.insert(id, todo.clone());
        todo
    }

    /// Returns all todos in creation order.
    pub async fn list_todos(&self) -> Vec<Todo> {
        self.todos.read().await.values().cloned().collect()
    }

    /// Returns the todo with the given key, if any.
    pub async fn find_todo(&self, id: RecordId) -> Option<Todo> {
        self.todos.read().await.get(&id).cloned()
    }

    /// Removes and returns the todo with the given key, if any.
    pub async fn remove_todo(&self, id: RecordId) -> Option<Todo> {
        self.todos.write().await.remove(&id)
    }

    /// Applies `changes` to the todo with the given key and returns the
    /// updated record, if any.
    pub async fn update_todo(&self, id: RecordId, changes: TodoChanges) -> Option<Todo> {
        let mut map = self.todos.write().await;
        let todo = map.get_mut(&id)?;
        changes.apply(todo);
        Some(todo.clone())
    }

    /// Returns the number of stored todos.
    pub async fn todo_count(&self) -> usize {
        self.todos.read().await.len()
    }

    /// Inserts a user under a freshly minted key.
    pub async fn insert_user(&self, new: NewUser) -> User {
        let mut map = self.users.write().await;
        let mut id = RecordId::new();
        while map.contains_key(&id) {
            id = RecordId::new();
        }
        let user = new.into_user(id);
        map.insert(id, user.clone());
        user
    }

    /// Returns the user with the given key, if any.
    pub async fn find_user(&self, id: RecordId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_todo(text: &str) -> NewTodo {
        let Ok(new) = NewTodo::new(text) else {
            panic!("valid text rejected");
        };
        new
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = MemoryStore::new();
        let todo = store.insert_todo(new_todo("first test todo")).await;

        let fetched = store.find_todo(todo.id).await;
        assert_eq!(fetched, Some(todo));
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let store = MemoryStore::new();
        assert!(store.find_todo(RecordId::new()).await.is_none());
    }

    #[tokio::test]
    async fn list_returns_every_record() {
        let store = MemoryStore::new();
        let a = store.insert_todo(new_todo("a")).await;
        let b = store.insert_todo(new_todo("b")).await;

        let texts: Vec<String> = store.list_todos().await.into_iter().map(|t| t.text).collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&a.text) && texts.contains(&b.text));
    }

    #[tokio::test]
    async fn remove_returns_record_once() {
        let store = MemoryStore::new();
        let todo = store.insert_todo(new_todo("gone soon")).await;

        assert_eq!(store.remove_todo(todo.id).await, Some(todo.clone()));
        assert!(store.remove_todo(todo.id).await.is_none());
        assert_eq!(store.todo_count().await, 0);
    }

    #[tokio::test]
    async fn update_applies_changes() {
        let store = MemoryStore::new();
        let todo = store.insert_todo(new_todo("open").completed_at(333)).await;

        let changes = TodoChanges {
            text: None,
            completed: false,
            completed_at: None,
        };
        let Some(updated) = store.update_todo(todo.id, changes).await else {
            panic!("todo vanished");
        };
        assert_eq!(updated.text, "open");
        assert!(!updated.completed);
        assert_eq!(updated.completed_at, None);
    }

    #[tokio::test]
    async fn update_unknown_returns_none() {
        let store = MemoryStore::new();
        let changes = TodoChanges {
            text: Some("x".to_string()),
            completed: true,
            completed_at: Some(1),
        };
        assert!(store.update_todo(RecordId::new(), changes).await.is_none());
    }

    #[tokio::test]
    async fn users_round_trip() {
        let store = MemoryStore::new();
        let Ok(new) = NewUser::new("Orhano") else {
            panic!("valid username rejected");
        };
        let user = store.insert_user(new).await;
        assert_eq!(store.find_user(user.id).await, Some(user));
    }
}
