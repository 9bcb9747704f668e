//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{NewIncident, Severity};
use crate::error::{IncidentError, IncidentResult};

// ==================== Create Incident ====================

/// Request to record a new incident.
///
/// Fields are optional so that absent, empty and mistyped values all reach
/// validation instead of failing deserialization.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateIncidentRequest {
    /// Short summary.
    #[serde(default, deserialize_with = "string_or_none")]
    pub title: Option<String>,
    /// What happened.
    #[serde(default, deserialize_with = "string_or_none")]
    pub description: Option<String>,
    /// One of `Low`, `Medium`, `High`.
    #[serde(default, deserialize_with = "string_or_none")]
    pub severity: Option<String>,
}

/// Accepts any JSON value, keeping it only when it is a string.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

impl CreateIncidentRequest {
    /// Parse a request body that has already been decoded as JSON.
    ///
    /// Anything but a non-empty object is rejected as not being JSON.
    pub fn from_json(body: Value) -> IncidentResult<Self> {
        if !matches!(&body, Value::Object(fields) if !fields.is_empty()) {
            return Err(IncidentError::BadRequest(NOT_JSON.to_string()));
        }

        serde_json::from_value(body).map_err(|_| IncidentError::BadRequest(NOT_JSON.to_string()))
    }

    /// Check required fields, then the severity, and build the incident.
    pub fn validate(self) -> IncidentResult<NewIncident> {
        let (title, description, severity) = match (
            non_empty(self.title),
            non_empty(self.description),
            non_empty(self.severity),
        ) {
            (Some(t), Some(d), Some(s)) => (t, d, s),
            _ => {
                return Err(IncidentError::BadRequest(
                    "Missing required fields: title, description, severity.".to_string(),
                ))
            }
        };

        let severity: Severity = severity.parse().map_err(|_| {
            IncidentError::BadRequest(format!(
                "Severity must be one of {}.",
                Severity::allowed()
            ))
        })?;

        Ok(NewIncident::new(title, description, severity))
    }
}

const NOT_JSON: &str = "Request must be JSON.";

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

// ==================== Delete Incident ====================

/// Confirmation returned after deleting an incident.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteIncidentResponse {
    /// e.g. `Incident 4 deleted successfully.`
    pub message: String,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Database connectivity.
    pub database: String,
    /// Timestamp.
    pub timestamp: String,
}
