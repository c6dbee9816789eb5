//! Repository for the `users` table.

use mdip_core::types::DbId;

use super::{apply_patch, delete_by_id, fetch_all_as, fetch_optional_as, inserted_id, Assignments};
use crate::error::DbError;
use crate::gateway::Gateway;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::schema::Table;
use crate::value::SqlValue;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning its id.
    ///
    /// A username that is already taken fails with a UNIQUE constraint
    /// violation from the store (see [`DbError::is_unique_violation`]).
    pub fn create(db: &Gateway, input: &CreateUser) -> Result<DbId, DbError> {
        let id = inserted_id(
            db,
            "INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)",
            &[
                SqlValue::from(&input.username),
                SqlValue::from(&input.password_hash),
                SqlValue::from(&input.role),
            ],
        )?;
        tracing::debug!(id, username = %input.username, "User created");
        Ok(id)
    }

    /// Find a user by internal ID.
    pub fn find_by_id(db: &Gateway, id: DbId) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        fetch_optional_as(db, &query, &[SqlValue::Integer(id)])
    }

    /// Find a user by username (case-sensitive).
    pub fn find_by_username(db: &Gateway, username: &str) -> Result<Option<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        fetch_optional_as(db, &query, &[SqlValue::from(username)])
    }

    /// Whether a username is already registered.
    pub fn exists(db: &Gateway, username: &str) -> Result<bool, DbError> {
        let row = db.fetch_one(
            "SELECT id FROM users WHERE username = ?",
            &[SqlValue::from(username)],
        )?;
        Ok(row.is_some())
    }

    /// List all users, newest id first.
    pub fn list(db: &Gateway) -> Result<Vec<User>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id DESC");
        fetch_all_as(db, &query, &[])
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    pub fn update(db: &Gateway, id: DbId, input: &UpdateUser) -> Result<u64, DbError> {
        let assignments = Assignments::new()
            .set("username", input.username.as_deref())
            .set("role", input.role.as_deref());
        apply_patch(db, Table::Users, id, assignments)
    }

    /// Replace a user's password hash. Returns rows changed (0 or 1).
    pub fn update_password(db: &Gateway, id: DbId, password_hash: &str) -> Result<u64, DbError> {
        let assignments = Assignments::new().set("password_hash", Some(password_hash));
        apply_patch(db, Table::Users, id, assignments)
    }

    /// Permanently delete a user. Returns rows removed (0 or 1).
    pub fn delete(db: &Gateway, id: DbId) -> Result<u64, DbError> {
        delete_by_id(db, Table::Users, id)
    }
}
