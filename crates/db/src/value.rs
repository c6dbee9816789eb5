//! Dynamically typed values and rows exchanged with the gateway.
//!
//! SQLite columns are loosely typed, so rows come back as ordered
//! column-to-[`SqlValue`] maps. Models decode them through [`FromRow`] and
//! the typed accessors on [`Row`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::DbError;

/// One bound parameter or one stored cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(value.into())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One result row: column names in select order, mapped to their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: IndexMap<String, SqlValue>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: SqlValue) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields.get(column)
    }

    /// Column names in the order the statement selected them.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn cell(&self, column: &str) -> Result<&SqlValue, DbError> {
        self.fields
            .get(column)
            .ok_or_else(|| DbError::decode(column, "column missing from result set"))
    }

    /// A nullable integer column. Integer-looking text is accepted because
    /// bulk-loaded rows may store numbers as text.
    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>, DbError> {
        match self.cell(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(v) => Ok(Some(*v)),
            SqlValue::Real(v) if v.fract() == 0.0 => Ok(Some(*v as i64)),
            SqlValue::Real(v) => Err(DbError::decode(column, format!("{v} is not an integer"))),
            SqlValue::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| DbError::decode(column, format!("'{s}' is not an integer"))),
        }
    }

    /// A NOT NULL integer column.
    pub fn i64(&self, column: &str) -> Result<i64, DbError> {
        self.opt_i64(column)?
            .ok_or_else(|| DbError::decode(column, "unexpected NULL"))
    }

    /// A nullable text column. Numbers are rendered as text.
    pub fn opt_string(&self, column: &str) -> Result<Option<String>, DbError> {
        Ok(match self.cell(column)? {
            SqlValue::Null => None,
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Integer(v) => Some(v.to_string()),
            SqlValue::Real(v) => Some(v.to_string()),
        })
    }

    /// A NOT NULL text column.
    pub fn string(&self, column: &str) -> Result<String, DbError> {
        self.opt_string(column)?
            .ok_or_else(|| DbError::decode(column, "unexpected NULL"))
    }
}

/// Build a value from one result row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self, DbError>;
}
