//! HTTP request handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::api::types::*;
use crate::domain::Incident;
use crate::error::{IncidentError, IncidentResult};
use crate::AppState;

/// List all incidents.
///
/// GET /incidents
#[utoipa::path(
    get,
    path = "/incidents",
    responses(
        (status = 200, description = "All recorded incidents", body = [Incident]),
        (status = 500, description = "Internal error")
    ),
    tag = "incidents"
)]
pub async fn list_incidents(State(state): State<AppState>) -> IncidentResult<Json<Vec<Incident>>> {
    let incidents = state.repository.list_all().await?;

    Ok(Json(incidents))
}

/// Record a new incident.
///
/// POST /incidents
#[utoipa::path(
    post,
    path = "/incidents",
    request_body = CreateIncidentRequest,
    responses(
        (status = 201, description = "Incident recorded", body = Incident),
        (status = 400, description = "Body is not JSON, a field is missing, or severity is invalid"),
        (status = 500, description = "Internal error")
    ),
    tag = "incidents"
)]
pub async fn create_incident(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> IncidentResult<(StatusCode, Json<Incident>)> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected non-JSON body");
        IncidentError::BadRequest("Request must be JSON.".to_string())
    })?;

    let new_incident = CreateIncidentRequest::from_json(body)?.validate()?;
    let incident = state.repository.create(&new_incident).await?;

    tracing::info!(
        incident_id = incident.id,
        severity = %incident.severity,
        "Incident recorded"
    );

    Ok((StatusCode::CREATED, Json(incident)))
}

/// Get a single incident.
///
/// GET /incidents/{id}
#[utoipa::path(
    get,
    path = "/incidents/{id}",
    params(
        ("id" = i64, Path, description = "Incident ID")
    ),
    responses(
        (status = 200, description = "Incident", body = Incident),
        (status = 404, description = "Incident not found"),
        (status = 500, description = "Internal error")
    ),
    tag = "incidents"
)]
pub async fn get_incident(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> IncidentResult<Json<Incident>> {
    let id = incident_id(id)?;

    let incident = state
        .repository
        .get_by_id(id)
        .await?
        .ok_or_else(IncidentError::incident_not_found)?;

    Ok(Json(incident))
}

/// Delete an incident.
///
/// DELETE /incidents/{id}
#[utoipa::path(
    delete,
    path = "/incidents/{id}",
    params(
        ("id" = i64, Path, description = "Incident ID")
    ),
    responses(
        (status = 200, description = "Incident deleted", body = DeleteIncidentResponse),
        (status = 404, description = "Incident not found"),
        (status = 500, description = "Internal error")
    ),
    tag = "incidents"
)]
pub async fn delete_incident(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> IncidentResult<Json<DeleteIncidentResponse>> {
    let id = incident_id(id)?;

    if !state.repository.delete_by_id(id).await? {
        return Err(IncidentError::incident_not_found());
    }

    tracing::info!(incident_id = id, "Incident deleted");

    Ok(Json(DeleteIncidentResponse {
        message: format!("Incident {} deleted successfully.", id),
    }))
}

/// A path segment that is not an integer cannot name an incident.
fn incident_id(path: Result<Path<i64>, PathRejection>) -> IncidentResult<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected incident id");
        IncidentError::incident_not_found()
    })
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, database) = match state.repository.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "unavailable")
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (code, Json(body))
}

/// Fallback for paths that match no route.
pub async fn not_found() -> IncidentError {
    IncidentError::unknown_route()
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed() -> IncidentError {
    IncidentError::method_not_allowed()
}
