//! The storage gateway: sole owner of the SQLite connection.
//!
//! A [`Gateway`] holds at most one open [`SqliteConnection`], opened lazily
//! on first use and released by [`Gateway::close`] or on drop. Every call is
//! blocking: the gateway drives sqlx on a private current-thread runtime, so
//! it must not be called from inside another async runtime.
//!
//! Writes run in SQLite's autocommit mode, one statement per call. There are
//! no multi-statement transactions and no pooling. Concurrent callers share
//! the one connection and are serialized on it.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row as _, TypeInfo, ValueRef};
use tokio::runtime::Runtime;

use mdip_core::types::DbId;

use crate::config::DatabaseConfig;
use crate::error::DbError;
use crate::value::{Row, SqlValue};

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    /// Rowid generated by an `INSERT`; `None` for other statements.
    pub last_insert_id: Option<DbId>,
}

#[derive(Default)]
struct Slot {
    conn: Option<SqliteConnection>,
    last_insert_id: Option<DbId>,
}

/// Single-connection handle to the persistent store.
pub struct Gateway {
    url: String,
    options: SqliteConnectOptions,
    runtime: Runtime,
    slot: Mutex<Slot>,
}

impl Gateway {
    /// Prepare a gateway for `url` without connecting.
    ///
    /// Fails only when the URL cannot be parsed or the runtime cannot start;
    /// an unreachable store is reported by the first call that needs it.
    pub fn new(url: &str, create_if_missing: bool) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|source| DbError::Connection {
                url: url.to_string(),
                source,
            })?
            .create_if_missing(create_if_missing);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            url: url.to_string(),
            options,
            runtime,
            slot: Mutex::new(Slot::default()),
        })
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DbError> {
        Self::new(&config.url, config.create_if_missing)
    }

    /// A private in-memory database, discarded when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::from_config(&DatabaseConfig::in_memory())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open the connection if it is not open yet. Idempotent.
    pub fn connect(&self) -> Result<(), DbError> {
        let mut slot = self.lock()?;
        self.ensure_open(&mut slot)?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.lock().map(|slot| slot.conn.is_some()).unwrap_or(false)
    }

    /// Run one write statement (INSERT/UPDATE/DELETE/DDL) and commit it.
    pub fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, DbError> {
        let mut slot = self.lock()?;
        let conn = self.ensure_open(&mut slot)?;

        let done = self
            .runtime
            .block_on(bind_params(sqlx::query(sql), params).execute(&mut *conn))?;

        let last_insert_id = is_insert(sql).then(|| done.last_insert_rowid());
        if last_insert_id.is_some() {
            slot.last_insert_id = last_insert_id;
        }

        tracing::debug!(
            statement = first_keyword(sql),
            rows_affected = done.rows_affected(),
            last_insert_id,
            "Executed write"
        );

        Ok(ExecResult {
            rows_affected: done.rows_affected(),
            last_insert_id,
        })
    }

    /// Run several semicolon-separated statements without parameters.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        let mut slot = self.lock()?;
        let conn = self.ensure_open(&mut slot)?;
        self.runtime.block_on(sqlx::raw_sql(sql).execute(&mut *conn))?;
        Ok(())
    }

    /// Run a read and return the first row, if any.
    pub fn fetch_one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>, DbError> {
        let mut slot = self.lock()?;
        let conn = self.ensure_open(&mut slot)?;

        let row = self
            .runtime
            .block_on(bind_params(sqlx::query(sql), params).fetch_optional(&mut *conn))?;

        row.as_ref().map(decode_row).transpose()
    }

    /// Run a read and return every row in result order.
    pub fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        let mut slot = self.lock()?;
        let conn = self.ensure_open(&mut slot)?;

        let rows = self
            .runtime
            .block_on(bind_params(sqlx::query(sql), params).fetch_all(&mut *conn))?;

        rows.iter().map(decode_row).collect()
    }

    /// Rowid generated by the most recent INSERT through this gateway.
    pub fn last_insert_id(&self) -> Option<DbId> {
        self.lock().ok().and_then(|slot| slot.last_insert_id)
    }

    /// Close the connection. Safe to call repeatedly; a later call that
    /// needs the store reopens it.
    pub fn close(&self) -> Result<(), DbError> {
        let mut slot = self.lock()?;
        self.close_slot(&mut slot)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slot>, DbError> {
        self.slot.lock().map_err(|_| DbError::Poisoned)
    }

    fn ensure_open<'a>(&self, slot: &'a mut Slot) -> Result<&'a mut SqliteConnection, DbError> {
        let conn = match slot.conn.take() {
            Some(conn) => conn,
            None => {
                let conn = self
                    .runtime
                    .block_on(self.options.connect())
                    .map_err(|source| DbError::Connection {
                        url: self.url.clone(),
                        source,
                    })?;
                tracing::info!(url = %self.url, "Database connection opened");
                conn
            }
        };
        Ok(slot.conn.insert(conn))
    }

    fn close_slot(&self, slot: &mut Slot) -> Result<(), DbError> {
        if let Some(conn) = slot.conn.take() {
            self.runtime.block_on(conn.close())?;
            tracing::info!(url = %self.url, "Database connection closed");
        }
        Ok(())
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut taken = std::mem::take(&mut *slot);
        drop(slot);
        if let Err(err) = self.close_slot(&mut taken) {
            tracing::warn!(url = %self.url, error = %err, "Failed to close database connection");
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("url", &self.url)
            .field("open", &self.is_open())
            .finish()
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

/// Convert a sqlx row into an ordered [`Row`], using each cell's storage
/// class rather than the column's declared type.
fn decode_row(row: &SqliteRow) -> Result<Row, DbError> {
    let mut out = Row::with_capacity(row.len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let storage = raw.type_info().name().to_ascii_uppercase();
            match storage.as_str() {
                "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" | "BOOLEAN" => {
                    SqlValue::Integer(row.try_get_unchecked::<i64, _>(index)?)
                }
                "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => {
                    SqlValue::Real(row.try_get_unchecked::<f64, _>(index)?)
                }
                "BLOB" => {
                    return Err(DbError::decode(column.name(), "BLOB values are not supported"))
                }
                _ => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
            }
        };
        out.insert(column.name(), value);
    }
    Ok(out)
}

fn first_keyword(sql: &str) -> &str {
    sql.split_whitespace().next().unwrap_or("")
}

fn is_insert(sql: &str) -> bool {
    first_keyword(sql).eq_ignore_ascii_case("INSERT")
}
