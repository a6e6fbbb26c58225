//! Todo DTOs for create, get, list, update and delete.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Todo;

/// Request body for `POST /todos`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Task text; required and non-blank.
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body wrapping a single todo.
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoResponse {
    /// The affected record.
    pub todo: Todo,
}

/// Response body for `GET /todos`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoListResponse {
    /// Every stored todo, oldest first.
    pub todos: Vec<Todo>,
}
