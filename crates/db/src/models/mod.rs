//! Domain entities and DTOs.
//!
//! Each submodule contains:
//! - An entity struct decoded from a stored row via [`FromRow`](crate::value::FromRow)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for sparse patches
//!
//! Entities are snapshots. Changing one in memory never touches storage;
//! write changes back through the matching repository.

pub mod dataset;
pub mod incident;
pub mod ticket;
pub mod user;

/// A label paired with how many rows carry it, from a `GROUP BY` query.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

impl crate::value::FromRow for LabelCount {
    fn from_row(row: &crate::value::Row) -> Result<Self, crate::error::DbError> {
        Ok(Self {
            label: row.opt_string("label")?.unwrap_or_default(),
            count: row.i64("count")?,
        })
    }
}
