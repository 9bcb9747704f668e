//! Database models for the incident registry.
//!
//! These are the row types returned by SQLx queries.

use sqlx::FromRow;

use crate::domain::Incident;
use crate::error::IncidentError;

/// Database row for the incidents table.
#[derive(Debug, Clone, FromRow)]
pub struct IncidentRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub severity: String,
}

impl TryFrom<IncidentRow> for Incident {
    type Error = IncidentError;

    fn try_from(row: IncidentRow) -> Result<Self, Self::Error> {
        Ok(Incident {
            id: row.id,
            title: row.title,
            description: row.description,
            severity: row.severity.parse().map_err(IncidentError::Internal)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    #[test]
    fn test_row_conversion() {
        let row = IncidentRow {
            id: 3,
            title: "t".to_string(),
            description: "d".to_string(),
            severity: "High".to_string(),
        };
        let incident = Incident::try_from(row).unwrap();
        assert_eq!(incident.id, 3);
        assert_eq!(incident.severity, Severity::High);
    }

    #[test]
    fn test_row_with_unknown_severity_is_internal_error() {
        let row = IncidentRow {
            id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            severity: "Critical".to_string(),
        };
        assert!(matches!(
            Incident::try_from(row),
            Err(IncidentError::Internal(_))
        ));
    }
}
