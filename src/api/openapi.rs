//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{
    CreateTodoRequest, CreateUserRequest, TodoListResponse, TodoResponse, UserResponse,
};
use crate::api::handlers::{system, todo, user};
use crate::domain::{Todo, TodoPatch, User};
use crate::error::ErrorResponse;

/// Generated OpenAPI specification for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "todo-gateway",
        description = "Task tracking REST API"
    ),
    paths(
        todo::create_todo,
        todo::list_todos,
        todo::get_todo,
        todo::delete_todo,
        todo::update_todo,
        user::create_user,
        user::get_user,
        system::health_handler,
    ),
    components(schemas(
        Todo,
        TodoPatch,
        CreateTodoRequest,
        TodoResponse,
        TodoListResponse,
        User,
        CreateUserRequest,
        UserResponse,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Todos", description = "Todo records"),
        (name = "Users", description = "User records"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs/openapi.json` when the Swagger UI is compiled out.
#[cfg(not(feature = "swagger-ui"))]
pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
