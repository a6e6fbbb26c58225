//! Database rows for todos and users.

use sqlx::FromRow;

use crate::domain::{RecordId, Todo, User};
use crate::error::ApiError;

/// A row from the `todos` table.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    /// 24-char lowercase hex key.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Completion time in epoch milliseconds.
    pub completed_at: Option<i64>,
}

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    /// 24-char lowercase hex key.
    pub id: String,
    /// Display name.
    pub username: String,
}

fn parse_key(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::Storage(format!("corrupt row key: {e}")))
}

impl TryFrom<TodoRow> for Todo {
    type Error = ApiError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_key(&row.id)?,
            text: row.text,
            completed: row.completed,
            completed_at: row.completed_at,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = ApiError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_key(&row.id)?,
            username: row.username,
        })
    }
}
