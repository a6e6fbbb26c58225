//! PostgreSQL implementation of the record store.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::{TodoRow, UserRow};
use crate::config::AppConfig;
use crate::domain::{NewTodo, NewUser, RecordId, Todo, TodoChanges, User};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Keys are minted in-process and stored as lowercase hex `TEXT`, so
/// ordering by `id` is creation order.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool with the configured limits and applies the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the connection or a migration fails.
    pub async fn connect(database_url: &str, config: &AppConfig) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(
            max_connections = config.database_max_connections,
            "postgres store ready"
        );
        Ok(Self::new(pool))
    }

    /// Inserts a todo under a freshly minted key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn insert_todo(&self, new: NewTodo) -> Result<Todo, ApiError> {
        let todo = new.into_todo(RecordId::new());
        let row = sqlx::query_as::<_, TodoRow>(
            "INSERT INTO todos (id, text, completed, completed_at) VALUES ($1, $2, $3, $4) \
             RETURNING id, text, completed, completed_at",
        )
        .bind(todo.id.to_string())
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Todo::try_from(row)
    }

    /// Returns all todos in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, text, completed, completed_at FROM todos ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    /// Returns the todo with the given key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn find_todo(&self, id: RecordId) -> Result<Option<Todo>, ApiError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT id, text, completed, completed_at FROM todos WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    /// Deletes and returns the todo with the given key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn remove_todo(&self, id: RecordId) -> Result<Option<Todo>, ApiError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "DELETE FROM todos WHERE id = $1 RETURNING id, text, completed, completed_at",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    /// Applies `changes` in a single statement and returns the updated
    /// record, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn update_todo(
        &self,
        id: RecordId,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, ApiError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "UPDATE todos SET text = COALESCE($2, text), completed = $3, completed_at = $4 \
             WHERE id = $1 RETURNING id, text, completed, completed_at",
        )
        .bind(id.to_string())
        .bind(changes.text)
        .bind(changes.completed)
        .bind(changes.completed_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Todo::try_from).transpose()
    }

    /// Inserts a user under a freshly minted key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn insert_user(&self, new: NewUser) -> Result<User, ApiError> {
        let user = new.into_user(RecordId::new());
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, username) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await?;

        User::try_from(row)
    }

    /// Returns the user with the given key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] on database failure.
    pub async fn find_user(&self, id: RecordId) -> Result<Option<User>, ApiError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::try_from).transpose()
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
