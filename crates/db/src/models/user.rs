//! User entity model and DTOs.

use mdip_core::roles::{is_admin_role, ROLE_USER};
use mdip_core::types::DbId;
use serde::Serialize;

use crate::error::DbError;
use crate::value::{FromRow, Row};

/// Full user row from the `users` table.
///
/// The password hash is never serialized and never shown by `Display`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

impl User {
    /// Whether the stored role is `admin` (case-insensitive).
    pub fn is_admin(&self) -> bool {
        is_admin_role(&self.role)
    }
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            username: row.string("username")?,
            password_hash: row.string("password_hash")?,
            role: row
                .opt_string("role")?
                .unwrap_or_else(|| ROLE_USER.to_string()),
        })
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User(id={}, username='{}', role='{}')",
            self.id, self.username, self.role
        )
    }
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub role: Option<String>,
}
