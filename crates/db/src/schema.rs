//! Schema bootstrap.
//!
//! [`ensure_schema`] creates the four tables when they are missing and is
//! safe to run on every start. There is no migration machinery: an existing
//! table is left exactly as it is.

use crate::error::DbError;
use crate::gateway::Gateway;

/// `CREATE TABLE IF NOT EXISTS` statements for every table.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS cyber_incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    incident_type TEXT,
    severity TEXT NOT NULL,
    status TEXT DEFAULT 'open',
    description TEXT,
    reported_by TEXT
);

CREATE TABLE IF NOT EXISTS datasets_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    source TEXT,
    category TEXT,
    size INTEGER
);

CREATE TABLE IF NOT EXISTS it_tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT DEFAULT 'open',
    created_date TEXT
);
";

/// The tables owned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    CyberIncidents,
    DatasetsMetadata,
    ItTickets,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Users,
        Table::CyberIncidents,
        Table::DatasetsMetadata,
        Table::ItTickets,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::CyberIncidents => "cyber_incidents",
            Table::DatasetsMetadata => "datasets_metadata",
            Table::ItTickets => "it_tickets",
        }
    }
}

/// Create any missing tables.
pub fn ensure_schema(db: &Gateway) -> Result<(), DbError> {
    db.execute_batch(SCHEMA_SQL)?;
    tracing::info!(tables = Table::ALL.len(), "Schema ensured");
    Ok(())
}

/// Number of rows currently stored in `table`.
pub fn row_count(db: &Gateway, table: Table) -> Result<i64, DbError> {
    let query = format!("SELECT COUNT(*) AS count FROM {}", table.name());
    match db.fetch_one(&query, &[])? {
        Some(row) => row.i64("count"),
        None => Ok(0),
    }
}

/// Row counts for every table, in [`Table::ALL`] order.
pub fn table_summary(db: &Gateway) -> Result<Vec<(Table, i64)>, DbError> {
    Table::ALL
        .iter()
        .map(|&table| Ok((table, row_count(db, table)?)))
        .collect()
}
