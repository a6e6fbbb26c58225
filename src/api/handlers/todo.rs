//! Todo CRUD handlers: create, list, get, update, delete.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_record_id;
use crate::api::dto::{CreateTodoRequest, TodoListResponse, TodoResponse};
use crate::app_state::AppState;
use crate::domain::{Todo, TodoPatch};
use crate::error::{ApiError, ErrorResponse};

/// `POST /todos` — Create a todo.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a missing or blank `text`.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    summary = "Create a todo",
    description = "Stores a new, incomplete todo and returns the full record.",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Todo created", body = Todo),
        (status = 400, description = "Missing text or storage failure", body = ErrorResponse),
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let todo = state.todo_service.create_todo(req.text.as_deref()).await?;
    Ok(Json(todo))
}

/// `GET /todos` — List every todo.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] if the store cannot be queried.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    summary = "List todos",
    description = "Returns all stored todos, unfiltered and unpaginated.",
    responses(
        (status = 200, description = "All todos", body = TodoListResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let todos = state.todo_service.list_todos().await?;
    Ok(Json(TodoListResponse { todos }))
}

/// `GET /todo/{id}` — Fetch a todo.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a malformed key and
/// [`ApiError::TodoNotFound`] for an unknown one.
#[utoipa::path(
    get,
    path = "/todo/{id}",
    tag = "Todos",
    summary = "Get a todo",
    params(
        ("id" = String, Path, description = "24-char hex record key"),
    ),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 404, description = "Malformed or unknown id", body = ErrorResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    let todo = state.todo_service.get_todo(id).await?;
    Ok(Json(TodoResponse { todo }))
}

/// `DELETE /todo/{id}` — Delete a todo and return it.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a malformed key and
/// [`ApiError::TodoNotFound`] for an unknown one.
#[utoipa::path(
    delete,
    path = "/todo/{id}",
    tag = "Todos",
    summary = "Delete a todo",
    params(
        ("id" = String, Path, description = "24-char hex record key"),
    ),
    responses(
        (status = 200, description = "Deleted record", body = TodoResponse),
        (status = 404, description = "Malformed or unknown id", body = ErrorResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    let todo = state.todo_service.delete_todo(id).await?;
    Ok(Json(TodoResponse { todo }))
}

/// `PATCH /todo/{id}` — Update text and completion.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a malformed key,
/// [`ApiError::TodoNotFound`] for an unknown one, and
/// [`ApiError::Validation`] for an unreadable body. An empty body is an
/// empty patch.
#[utoipa::path(
    patch,
    path = "/todo/{id}",
    tag = "Todos",
    summary = "Update a todo",
    description = "Only `text` and `completed` are read. `completed: true` stamps `completedAt` with the current time; anything else reopens the todo and clears it.",
    params(
        ("id" = String, Path, description = "24-char hex record key"),
    ),
    request_body = TodoPatch,
    responses(
        (status = 200, description = "Updated record", body = TodoResponse),
        (status = 404, description = "Malformed or unknown id", body = ErrorResponse),
        (status = 400, description = "Invalid body or storage failure", body = ErrorResponse),
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    let body = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let patch = read_patch(&headers, &body)?;
    let todo = state.todo_service.update_todo(id, patch).await?;
    Ok(Json(TodoResponse { todo }))
}

/// Decodes a PATCH body. Blank bodies carry no fields and decode to
/// [`TodoPatch::default`]; anything else must be JSON.
fn read_patch(headers: &HeaderMap, body: &[u8]) -> Result<TodoPatch, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoPatch::default());
    }
    if !is_json(headers) {
        return Err(ApiError::Validation(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }
    let Json(patch) = Json::<TodoPatch>::from_bytes(body)?;
    Ok(patch)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

/// Todo routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route(
            "/todo/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}
