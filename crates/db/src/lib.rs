//! Storage layer: the single-connection gateway, schema bootstrap, entity
//! models and one repository per table.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod value;

pub use config::DatabaseConfig;
pub use error::DbError;
pub use gateway::{ExecResult, Gateway};
pub use value::{FromRow, Row, SqlValue};

/// Open a gateway for the configured database.
///
/// The connection itself is opened lazily on first use; call
/// [`health_check`] to force it open and surface connection errors early.
pub fn open(config: &DatabaseConfig) -> Result<Gateway, DbError> {
    Gateway::from_config(config)
}

/// Run a trivial query to confirm the store is reachable.
pub fn health_check(db: &Gateway) -> Result<(), DbError> {
    db.fetch_one("SELECT 1 AS ok", &[])?;
    Ok(())
}
