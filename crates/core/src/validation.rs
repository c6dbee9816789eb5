//! Input validation for credentials and new records.
//!
//! Repositories assume their input has already passed these checks; the
//! calling layer runs them first and reports the message back to the user.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Limits
-------------------------------------------------------------------------- */

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 50;

/* --------------------------------------------------------------------------
Credentials
-------------------------------------------------------------------------- */

/// Usernames are 3-20 characters, letters and digits only.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters."
        )));
    }
    if !username.chars().all(char::is_alphanumeric) {
        return Err(CoreError::Validation(
            "Username must contain only letters and numbers.".to_string(),
        ));
    }
    Ok(())
}

/// Passwords are 6-50 characters. No composition rules.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters."
        )));
    }
    if len > PASSWORD_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Password cannot exceed {PASSWORD_MAX_LEN} characters."
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Records
-------------------------------------------------------------------------- */

/// Reject empty or whitespace-only values for a required text column.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required.")));
    }
    Ok(())
}

/// Dataset sizes are whole megabytes and never negative.
pub fn validate_dataset_size(size_mb: i64) -> Result<(), CoreError> {
    if size_mb < 0 {
        return Err(CoreError::Validation(format!(
            "Dataset size cannot be negative (got {size_mb} MB)."
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
