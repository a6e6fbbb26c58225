//! User handlers: create and get.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_record_id;
use crate::api::dto::{CreateUserRequest, UserResponse};
use crate::app_state::AppState;
use crate::domain::User;
use crate::error::{ApiError, ErrorResponse};

/// `POST /users` — Create a user.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a missing or blank `username`.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    summary = "Create a user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Missing username or storage failure", body = ErrorResponse),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let user = state.user_service.create_user(req.username.as_deref()).await?;
    Ok(Json(user))
}

/// `GET /user/{id}` — Fetch a user.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a malformed key and
/// [`ApiError::UserNotFound`] for an unknown one.
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    summary = "Get a user",
    params(
        ("id" = String, Path, description = "24-char hex record key"),
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "Malformed or unknown id", body = ErrorResponse),
        (status = 400, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse { user }))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/user/{id}", get(get_user))
}
