//! Dataset metadata entity model and DTOs.

use mdip_core::sizing;
use mdip_core::types::DbId;
use serde::Serialize;

use crate::error::DbError;
use crate::value::{FromRow, Row, SqlValue};

/// Shown when a dataset has no recorded source.
pub const DEFAULT_SOURCE: &str = "Unknown";

/// Shown when a dataset has no recorded category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Full dataset row from the `datasets_metadata` table.
///
/// Empty or NULL `source`/`category` are replaced by [`DEFAULT_SOURCE`] and
/// [`DEFAULT_CATEGORY`]; a NULL size reads as 0. A fractional size, stored
/// as REAL or as numeric text, is rounded to the nearest whole megabyte.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub id: DbId,
    pub name: String,
    pub source: String,
    pub category: String,
    /// Size in megabytes.
    pub size: i64,
}

impl Dataset {
    pub fn size_gb(&self) -> f64 {
        sizing::size_gb(self.size)
    }

    /// "500 MB" below 1024 MB, "1.0 GB" from 1024 MB up.
    pub fn size_formatted(&self) -> String {
        sizing::size_formatted(self.size)
    }

    pub fn is_large(&self) -> bool {
        sizing::is_large(self.size)
    }
}

impl FromRow for Dataset {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            name: row.string("name")?,
            source: or_default(row.opt_string("source")?, DEFAULT_SOURCE),
            category: or_default(row.opt_string("category")?, DEFAULT_CATEGORY),
            size: size_mb(row)?,
        })
    }
}

fn size_mb(row: &Row) -> Result<i64, DbError> {
    let fractional = match row.get("size") {
        Some(SqlValue::Real(v)) => Some(*v),
        Some(SqlValue::Text(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match fractional {
        Some(v) if v.is_finite() => Ok(v.round() as i64),
        _ => Ok(row.opt_i64("size")?.unwrap_or(0)),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dataset #{}: {} [{}] - {}",
            self.id,
            self.name,
            self.size_formatted(),
            self.category
        )
    }
}

/// DTO for creating a new dataset.
#[derive(Debug, Clone)]
pub struct CreateDataset {
    pub name: String,
    pub source: Option<String>,
    pub category: Option<String>,
    /// Size in megabytes; stored as 0 when `None`.
    pub size: Option<i64>,
}

/// DTO for updating an existing dataset. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateDataset {
    pub name: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: SqlValue, category: SqlValue, size: SqlValue) -> Row {
        let mut row = Row::default();
        row.insert("id", SqlValue::Integer(4));
        row.insert("name", SqlValue::Text("Customer Churn".into()));
        row.insert("source", source);
        row.insert("category", category);
        row.insert("size", size);
        row
    }

    #[test]
    fn missing_fields_take_defaults() {
        let ds = Dataset::from_row(&row(
            SqlValue::Null,
            SqlValue::Text(String::new()),
            SqlValue::Null,
        ))
        .unwrap();
        assert_eq!(ds.source, "Unknown");
        assert_eq!(ds.category, "Uncategorized");
        assert_eq!(ds.size, 0);
    }

    #[test]
    fn stored_fields_are_kept() {
        let ds = Dataset::from_row(&row(
            SqlValue::Text("Kaggle".into()),
            SqlValue::Text("Marketing".into()),
            SqlValue::Integer(2048),
        ))
        .unwrap();
        assert_eq!(ds.source, "Kaggle");
        assert_eq!(ds.category, "Marketing");
        assert!(ds.is_large());
        assert_eq!(ds.size_formatted(), "2.0 GB");
        assert_eq!(ds.to_string(), "Dataset #4: Customer Churn [2.0 GB] - Marketing");
    }

    #[test]
    fn fractional_size_rounds_to_nearest_megabyte() {
        let size = |value: SqlValue| {
            Dataset::from_row(&row(SqlValue::Null, SqlValue::Null, value))
                .unwrap()
                .size
        };
        assert_eq!(size(SqlValue::Real(1.5)), 2);
        assert_eq!(size(SqlValue::Real(1023.4)), 1023);
        assert_eq!(size(SqlValue::Text("1024.6".into())), 1025);
        assert_eq!(size(SqlValue::Text("300".into())), 300);
    }

    #[test]
    fn non_numeric_size_is_decode_error() {
        let err = Dataset::from_row(&row(
            SqlValue::Null,
            SqlValue::Null,
            SqlValue::Text("big".into()),
        ))
        .unwrap_err();
        assert!(matches!(err, DbError::Decode { .. }));
    }
}
