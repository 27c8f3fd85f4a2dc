//! User service error types.

use thiserror::Error;

use sundry_core::UserNameError;

use crate::db::RepositoryError;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Missing or malformed user name.
    #[error("invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid user name or password")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    NotFound,

    /// User name already exists.
    #[error("user name already exists")]
    UserNameTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
