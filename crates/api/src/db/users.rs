//! User repository for database operations.
//!
//! Provides database access for shop accounts. Password hashes stay inside
//! this module's queries; only [`UserRepository::get_password_hash`] hands
//! one out, for credential verification in the user service.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sundry_core::{UserId, UserName};

use super::RepositoryError;
use crate::models::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    user_name: String,
    admin_permission: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let user_name = UserName::parse(&row.user_name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user name in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            user_name,
            admin_permission: row.admin_permission,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Row type for the login lookup: account columns plus the stored hash.
#[derive(Debug, sqlx::FromRow)]
struct UserWithHashRow {
    id: i32,
    user_name: String,
    password_hash: String,
    admin_permission: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, user_name, admin_permission, created_at, updated_at
            FROM users
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, user_name, admin_permission, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user by their user name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_name(&self, name: &UserName) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, user_name, admin_permission, created_at, updated_at
            FROM users
            WHERE user_name = $1
            ",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by user name.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_password_hash(
        &self,
        name: &UserName,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r"
            SELECT id, user_name, password_hash, admin_permission, created_at, updated_at
            FROM users
            WHERE user_name = $1
            ",
        )
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let user_name = UserName::parse(&r.user_name).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user name in database: {e}"))
        })?;

        let user = User {
            id: UserId::new(r.id),
            user_name,
            admin_permission: r.admin_permission,
            created_at: r.created_at,
            updated_at: r.updated_at,
        };

        Ok(Some((user, r.password_hash)))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &UserName,
        password_hash: &str,
        admin_permission: i16,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (user_name, password_hash, admin_permission)
            VALUES ($1, $2, $3)
            RETURNING id, user_name, admin_permission, created_at, updated_at
            ",
        )
        .bind(name.as_str())
        .bind(password_hash)
        .bind(admin_permission)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("user name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Update a user's mutable fields and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: UserId,
        name: &UserName,
        password_hash: &str,
        admin_permission: i16,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET user_name = $1, password_hash = $2, admin_permission = $3, updated_at = now()
            WHERE id = $4
            RETURNING id, user_name, admin_permission, created_at, updated_at
            ",
        )
        .bind(name.as_str())
        .bind(password_hash)
        .bind(admin_permission)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("user name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a user by their ID.
    ///
    /// Cart lines referencing the user cascade away with the row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Check whether a user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }
}
