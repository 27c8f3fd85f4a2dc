//! User service.
//!
//! Registration, login, and account CRUD. Passwords are hashed with
//! argon2id before they reach the database; login verifies against the
//! stored hash and issues an opaque token.

mod error;

pub use error::UserError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use uuid::Uuid;

use sundry_core::{UserId, UserName};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// User service.
///
/// Handles account registration, login, and profile management.
pub struct UserService<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidUserName` if the user name is missing or
    /// malformed.
    /// Returns `UserError::UserNameTaken` if the name is already registered.
    pub async fn register(
        &self,
        user_name: &str,
        password: &str,
        admin_permission: i16,
    ) -> Result<User, UserError> {
        let name = UserName::parse(user_name)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&name, &password_hash, admin_permission)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => UserError::UserNameTaken,
                other => UserError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with user name and password.
    ///
    /// On success returns the user and a fresh opaque token.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidCredentials` if the name/password is wrong.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<(User, Uuid), UserError> {
        // A name that can't exist can't log in; don't leak which part failed.
        let name = UserName::parse(user_name).map_err(|_| UserError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&name)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok((user, Uuid::new_v4()))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user doesn't exist.
    pub async fn get(&self, id: UserId) -> Result<User, UserError> {
        self.users.get_by_id(id).await?.ok_or(UserError::NotFound)
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns `UserError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        let users = self.users.list_all().await?;
        Ok(users)
    }

    /// Update a user's name, password, and admin flag.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidUserName` if the new name is malformed.
    /// Returns `UserError::NotFound` if the user doesn't exist.
    /// Returns `UserError::UserNameTaken` if the new name is already used.
    pub async fn update(
        &self,
        id: UserId,
        user_name: &str,
        password: &str,
        admin_permission: i16,
    ) -> Result<User, UserError> {
        let name = UserName::parse(user_name)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .update(id, &name, &password_hash, admin_permission)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => UserError::NotFound,
                RepositoryError::Conflict(_) => UserError::UserNameTaken,
                other => UserError::Repository(other),
            })?;

        Ok(user)
    }

    /// Delete a user. Their cart lines cascade away.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if the user doesn't exist.
    pub async fn delete(&self, id: UserId) -> Result<(), UserError> {
        self.users.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => UserError::NotFound,
            other => UserError::Repository(other),
        })
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| UserError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), UserError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| UserError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| UserError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("password-test").unwrap();
        assert!(verify_password("password-test", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("password-test").unwrap();
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(UserError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_garbage_hash() {
        assert!(matches!(
            verify_password("password-test", "not-a-phc-string"),
            Err(UserError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("password-test").unwrap();
        let b = hash_password("password-test").unwrap();
        assert_ne!(a, b);
    }
}
