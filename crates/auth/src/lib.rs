//! Account registration and login on top of the `users` table.
//!
//! Passwords are hashed with Argon2id ([`password`]); the work factor comes
//! from [`PasswordConfig`]. [`AuthService`] ties validation, hashing and the
//! user repository together.

pub mod config;
pub mod error;
pub mod password;
pub mod service;

pub use config::PasswordConfig;
pub use error::AuthError;
pub use service::AuthService;
