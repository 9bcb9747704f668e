//! Route definitions for the API.

use std::path::Path;

use axum::{
    routing::{get, get_service},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::handlers;
use crate::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_incidents,
        handlers::create_incident,
        handlers::get_incident,
        handlers::delete_incident,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::CreateIncidentRequest,
        crate::api::types::DeleteIncidentResponse,
        crate::api::types::HealthResponse,
        crate::domain::Incident,
        crate::domain::Severity,
    )),
    tags(
        (name = "incidents", description = "AI safety incident records"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "AI Safety Incident Registry API",
        version = "0.1.0",
        description = "Create, list, fetch and delete AI safety incident reports",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the API router.
///
/// `index_file` is the landing page served at `/`. Unknown paths and
/// unsupported methods answer with the same JSON error body as the handlers.
pub fn build_router(state: AppState, index_file: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Incidents
        .route(
            "/incidents",
            get(handlers::list_incidents)
                .post(handlers::create_incident)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/incidents/:id",
            get(handlers::get_incident)
                .delete(handlers::delete_incident)
                .fallback(handlers::method_not_allowed),
        )
        // Health
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
        // Landing page
        .route(
            "/",
            get_service(ServeFile::new(index_file)).fallback(handlers::method_not_allowed),
        )
        // OpenAPI docs
        .route(
            "/api-docs/openapi.json",
            get(openapi_json).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
