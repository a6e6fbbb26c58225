//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Resource routes are mounted at the root (`/todos`, `/todo/{id}`,
//! `/users`, `/user/{id}`) next to the system routes.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints and the
/// OpenAPI document.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        axum::routing::get(openapi::openapi_json),
    );

    router
}
