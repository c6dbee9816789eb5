//! Registration and login.

use mdip_core::roles::ROLE_USER;
use mdip_core::types::DbId;
use mdip_core::validation;
use mdip_db::models::user::{CreateUser, User};
use mdip_db::repositories::UserRepo;
use mdip_db::Gateway;

use crate::config::PasswordConfig;
use crate::error::AuthError;
use crate::password::{hash_password, verify_password};

/// Authentication over a shared [`Gateway`].
#[derive(Debug)]
pub struct AuthService<'a> {
    db: &'a Gateway,
    config: PasswordConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Gateway, config: PasswordConfig) -> Self {
        Self { db, config }
    }

    /// Usernames are 3-20 alphanumeric characters.
    pub fn validate_username(&self, username: &str) -> Result<(), AuthError> {
        Ok(validation::validate_username(username)?)
    }

    /// Passwords are 6-50 characters.
    pub fn validate_password(&self, password: &str) -> Result<(), AuthError> {
        Ok(validation::validate_password(password)?)
    }

    /// Register a new account and return its id.
    ///
    /// Checks run in order: username rules, duplicate username, password
    /// rules. `role` defaults to `"user"`.
    ///
    /// The duplicate check and the insert are separate statements. Two
    /// registrations of the same name racing each other can both pass the
    /// check; the loser then fails on the UNIQUE constraint and gets
    /// [`AuthError::Storage`] rather than [`AuthError::DuplicateUser`].
    pub fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<DbId, AuthError> {
        self.validate_username(username)?;

        if UserRepo::exists(self.db, username)? {
            tracing::warn!(username, "Registration rejected: username taken");
            return Err(AuthError::DuplicateUser(username.to_string()));
        }

        self.validate_password(password)?;

        let input = CreateUser {
            username: username.to_string(),
            password_hash: hash_password(password, &self.config)?,
            role: role.unwrap_or(ROLE_USER).to_string(),
        };
        let id = UserRepo::create(self.db, &input)?;

        tracing::info!(user_id = id, username, role = %input.role, "User registered");
        Ok(id)
    }

    /// Check credentials and return the stored user, role included.
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = UserRepo::find_by_username(self.db, username)? else {
            tracing::warn!(username, "Login failed: unknown user");
            return Err(AuthError::UserNotFound);
        };

        if !verify_password(password, &user.password_hash, &self.config) {
            tracing::warn!(user_id = user.id, "Login failed: incorrect password");
            return Err(AuthError::IncorrectPassword);
        }

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    pub fn user_exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(UserRepo::exists(self.db, username)?)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(UserRepo::find_by_username(self.db, username)?)
    }
}
