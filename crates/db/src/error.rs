/// Errors raised by the storage gateway and repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The store could not be opened (bad URL, missing file, permissions).
    #[error("Could not open database '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// A statement was rejected by the store.
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),

    /// A stored value could not be turned into the expected field type.
    #[error("Could not decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// The gateway's private runtime could not be started.
    #[error("Could not start database runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// A previous caller panicked while holding the connection.
    #[error("Database connection lock poisoned")]
    Poisoned,
}

impl DbError {
    pub(crate) fn decode(column: &str, reason: impl Into<String>) -> Self {
        DbError::Decode {
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the store rejected a write because of a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Query(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
