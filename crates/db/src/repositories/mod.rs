//! Repository layer.
//!
//! Each repository is a zero-sized struct providing blocking CRUD methods
//! that accept `&Gateway` as the first argument. Repositories assume their
//! input has already been validated.

pub mod dataset_repo;
pub mod incident_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use dataset_repo::DatasetRepo;
pub use incident_repo::IncidentRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;

use mdip_core::types::DbId;

use crate::error::DbError;
use crate::gateway::Gateway;
use crate::schema::Table;
use crate::value::{FromRow, SqlValue};

/// The `SET` clause of a sparse update, built from the fields a patch
/// actually carries. Values are always bound, never interpolated.
#[derive(Debug, Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    params: Vec<SqlValue>,
}

impl Assignments {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add `column = ?` when `value` is present.
    pub(crate) fn set<T: Into<SqlValue>>(mut self, column: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.columns.push(column);
            self.params.push(value.into());
        }
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn into_statement(self, table: Table, id: DbId) -> (String, Vec<SqlValue>) {
        let set_clause = self
            .columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {set_clause} WHERE id = ?", table.name());
        let mut params = self.params;
        params.push(SqlValue::Integer(id));
        (sql, params)
    }
}

/// Apply a sparse update to one row. An empty patch is a no-op reporting
/// zero rows.
pub(crate) fn apply_patch(
    db: &Gateway,
    table: Table,
    id: DbId,
    assignments: Assignments,
) -> Result<u64, DbError> {
    if assignments.is_empty() {
        return Ok(0);
    }
    let (sql, params) = assignments.into_statement(table, id);
    let rows = db.execute(&sql, &params)?.rows_affected;
    tracing::debug!(table = table.name(), id, rows, "Applied patch");
    Ok(rows)
}

/// Delete one row by id, returning rows affected.
pub(crate) fn delete_by_id(db: &Gateway, table: Table, id: DbId) -> Result<u64, DbError> {
    let sql = format!("DELETE FROM {} WHERE id = ?", table.name());
    let rows = db.execute(&sql, &[SqlValue::Integer(id)])?.rows_affected;
    tracing::debug!(table = table.name(), id, rows, "Deleted row");
    Ok(rows)
}

/// Run a read and decode every row.
pub(crate) fn fetch_all_as<T: FromRow>(
    db: &Gateway,
    sql: &str,
    params: &[SqlValue],
) -> Result<Vec<T>, DbError> {
    db.fetch_all(sql, params)?.iter().map(T::from_row).collect()
}

/// Run a read and decode the first row, if any.
pub(crate) fn fetch_optional_as<T: FromRow>(
    db: &Gateway,
    sql: &str,
    params: &[SqlValue],
) -> Result<Option<T>, DbError> {
    db.fetch_one(sql, params)?.as_ref().map(T::from_row).transpose()
}

/// Id generated by this insert. A statement the gateway does not treat as
/// an INSERT reports no rowid and fails here.
pub(crate) fn inserted_id(db: &Gateway, sql: &str, params: &[SqlValue]) -> Result<DbId, DbError> {
    db.execute(sql, params)?
        .last_insert_id
        .ok_or_else(|| DbError::decode("id", "insert did not report a rowid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_fields_reach_the_statement() {
        let (sql, params) = Assignments::new()
            .set("status", Some("Resolved"))
            .set("severity", None::<&str>)
            .set("size", Some(10_i64))
            .into_statement(Table::DatasetsMetadata, 5);
        assert_eq!(sql, "UPDATE datasets_metadata SET status = ?, size = ? WHERE id = ?");
        assert_eq!(
            params,
            vec![
                SqlValue::Text("Resolved".into()),
                SqlValue::Integer(10),
                SqlValue::Integer(5)
            ]
        );
    }

    #[test]
    fn non_insert_statement_reports_no_id() {
        let db = Gateway::open_in_memory().unwrap();
        crate::schema::ensure_schema(&db).unwrap();
        inserted_id(
            &db,
            "INSERT INTO it_tickets (title, priority) VALUES (?, ?)",
            &[SqlValue::from("first"), SqlValue::from("Low")],
        )
        .unwrap();

        let err = inserted_id(
            &db,
            "REPLACE INTO it_tickets (title, priority) VALUES (?, ?)",
            &[SqlValue::from("second"), SqlValue::from("Low")],
        )
        .unwrap_err();
        assert!(matches!(err, DbError::Decode { ref column, .. } if column == "id"));
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(Assignments::new().set("title", None::<String>).is_empty());
    }
}
