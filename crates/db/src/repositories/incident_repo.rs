//! Repository for the `cyber_incidents` table.

use mdip_core::types::DbId;

use super::{apply_patch, delete_by_id, fetch_all_as, fetch_optional_as, inserted_id, Assignments};
use crate::error::DbError;
use crate::gateway::Gateway;
use crate::models::incident::{CreateIncident, SecurityIncident, UpdateIncident};
use crate::models::LabelCount;
use crate::schema::Table;
use crate::value::SqlValue;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, date, incident_type, severity, status, description, reported_by";

/// Provides CRUD operations and analytics for security incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Insert a new incident, returning its id.
    pub fn create(db: &Gateway, input: &CreateIncident) -> Result<DbId, DbError> {
        let id = inserted_id(
            db,
            "INSERT INTO cyber_incidents
                (date, incident_type, severity, status, description, reported_by)
             VALUES (?, ?, ?, ?, ?, ?)",
            &[
                SqlValue::from(&input.date),
                SqlValue::from(&input.incident_type),
                SqlValue::from(&input.severity),
                SqlValue::from(&input.status),
                SqlValue::from(&input.description),
                SqlValue::from(input.reported_by.as_deref()),
            ],
        )?;
        tracing::debug!(id, severity = %input.severity, "Incident created");
        Ok(id)
    }

    /// List all incidents, newest id first.
    pub fn list(db: &Gateway) -> Result<Vec<SecurityIncident>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM cyber_incidents ORDER BY id DESC");
        fetch_all_as(db, &query, &[])
    }

    /// Find an incident by id.
    pub fn find_by_id(db: &Gateway, id: DbId) -> Result<Option<SecurityIncident>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM cyber_incidents WHERE id = ?");
        fetch_optional_as(db, &query, &[SqlValue::Integer(id)])
    }

    /// Update an incident. Only non-`None` fields in `input` are applied.
    ///
    /// Returns the number of rows changed: 0 for an empty patch or unknown id.
    pub fn update(db: &Gateway, id: DbId, input: &UpdateIncident) -> Result<u64, DbError> {
        let assignments = Assignments::new()
            .set("date", input.date.as_deref())
            .set("incident_type", input.incident_type.as_deref())
            .set("severity", input.severity.as_deref())
            .set("status", input.status.as_deref())
            .set("description", input.description.as_deref())
            .set("reported_by", input.reported_by.as_deref());
        apply_patch(db, Table::CyberIncidents, id, assignments)
    }

    /// Set only the status column.
    pub fn update_status(db: &Gateway, id: DbId, status: &str) -> Result<u64, DbError> {
        Self::update(db, id, &UpdateIncident::status(status))
    }

    /// Permanently delete an incident. Returns rows removed (0 or 1).
    pub fn delete(db: &Gateway, id: DbId) -> Result<u64, DbError> {
        delete_by_id(db, Table::CyberIncidents, id)
    }

    /// Incidents whose severity is critical.
    pub fn list_critical(db: &Gateway) -> Result<Vec<SecurityIncident>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(SecurityIncident::is_critical)
            .collect())
    }

    /// Incidents not yet resolved.
    pub fn list_unresolved(db: &Gateway) -> Result<Vec<SecurityIncident>, DbError> {
        Ok(Self::list(db)?
            .into_iter()
            .filter(|incident| !incident.is_resolved())
            .collect())
    }

    /// Incident counts per type, most common first.
    pub fn count_by_type(db: &Gateway) -> Result<Vec<LabelCount>, DbError> {
        fetch_all_as(
            db,
            "SELECT incident_type AS label, COUNT(*) AS count
             FROM cyber_incidents
             GROUP BY incident_type
             ORDER BY count DESC, label ASC",
            &[],
        )
    }

    /// Status breakdown for incidents of one severity (case-insensitive).
    pub fn count_by_status_for_severity(
        db: &Gateway,
        severity: &str,
    ) -> Result<Vec<LabelCount>, DbError> {
        fetch_all_as(
            db,
            "SELECT status AS label, COUNT(*) AS count
             FROM cyber_incidents
             WHERE severity = ? COLLATE NOCASE
             GROUP BY status
             ORDER BY count DESC, label ASC",
            &[SqlValue::from(severity)],
        )
    }

    /// Incident types with strictly more than `min_count` incidents.
    pub fn types_with_more_than(db: &Gateway, min_count: i64) -> Result<Vec<LabelCount>, DbError> {
        fetch_all_as(
            db,
            "SELECT incident_type AS label, COUNT(*) AS count
             FROM cyber_incidents
             GROUP BY incident_type
             HAVING COUNT(*) > ?
             ORDER BY count DESC, label ASC",
            &[SqlValue::Integer(min_count)],
        )
    }
}
