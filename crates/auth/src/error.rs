use mdip_core::error::CoreError;
use mdip_db::DbError;

/// Errors surfaced by registration and login.
///
/// Every variant's `Display` is a complete sentence that can be shown to the
/// person at the keyboard as-is.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A username or password broke a validation rule.
    #[error("{0}")]
    Validation(String),

    #[error("Username '{0}' already exists.")]
    DuplicateUser(String),

    #[error("Username not found.")]
    UserNotFound,

    #[error("Incorrect password.")]
    IncorrectPassword,

    /// The hasher rejected its parameters or input.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The store failed, including a UNIQUE violation from a registration
    /// that lost a race with another one.
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl From<CoreError> for AuthError {
    fn from(err: CoreError) -> Self {
        AuthError::Validation(err.to_string())
    }
}
