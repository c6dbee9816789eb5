//! Pure domain rules for the record platform.
//!
//! Nothing in this crate performs I/O. Storage lives in `mdip-db`,
//! credential handling in `mdip-auth`.

pub mod assistant;
pub mod error;
pub mod ranking;
pub mod roles;
pub mod sizing;
pub mod types;
pub mod validation;
