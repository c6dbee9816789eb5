//! Security incident entity model and DTOs.

use mdip_core::ranking::{self, STATUS_OPEN};
use mdip_core::types::DbId;
use serde::Serialize;

use crate::error::DbError;
use crate::value::{FromRow, Row};

/// Full incident row from the `cyber_incidents` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityIncident {
    pub id: DbId,
    /// Caller-supplied date text, usually `YYYY-MM-DD`.
    pub date: String,
    pub incident_type: String,
    pub severity: String,
    pub status: String,
    pub description: String,
    pub reported_by: String,
}

impl SecurityIncident {
    /// Ordinal severity: low 1, medium 2, high 3, critical 4, otherwise 0.
    pub fn severity_level(&self) -> u8 {
        ranking::ordinal_level(&self.severity)
    }

    pub fn is_critical(&self) -> bool {
        ranking::is_critical(&self.severity)
    }

    pub fn is_resolved(&self) -> bool {
        ranking::is_resolved(&self.status)
    }

    /// A copy with a different status. Not persisted.
    pub fn with_status(&self, status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..self.clone()
        }
    }
}

impl FromRow for SecurityIncident {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            date: row.opt_string("date")?.unwrap_or_default(),
            incident_type: row.opt_string("incident_type")?.unwrap_or_default(),
            severity: row.string("severity")?,
            status: row
                .opt_string("status")?
                .unwrap_or_else(|| STATUS_OPEN.to_string()),
            description: row.opt_string("description")?.unwrap_or_default(),
            reported_by: row.opt_string("reported_by")?.unwrap_or_default(),
        })
    }
}

impl std::fmt::Display for SecurityIncident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incident #{}: {} [{}] - {}",
            self.id,
            self.incident_type,
            self.severity.to_uppercase(),
            self.status
        )
    }
}

/// DTO for creating a new incident.
#[derive(Debug, Clone)]
pub struct CreateIncident {
    pub date: String,
    pub incident_type: String,
    pub severity: String,
    pub status: String,
    pub description: String,
    pub reported_by: Option<String>,
}

/// DTO for updating an existing incident. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncident {
    pub date: Option<String>,
    pub incident_type: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reported_by: Option<String>,
}

impl UpdateIncident {
    /// A patch that only changes the status.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}
