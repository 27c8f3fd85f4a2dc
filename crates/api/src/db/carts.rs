//! Cart repository for database operations.
//!
//! Cart lines have a composite primary key (user, product): the unique
//! violation on insert means the pair is already in the cart.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use sundry_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::CartLine;

/// Internal row type for `PostgreSQL` cart queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    user_id: i32,
    product_id: i32,
    amount: i32,
    total_price: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            amount: row.amount,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT user_id, product_id, amount, total_price, created_at, updated_at
            FROM cart_items
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single cart line by its (user, product) key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT user_id, product_id, amount, total_price, created_at, updated_at
            FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Insert a new cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the (user, product) pair is
    /// already in the cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        amount: i32,
        total_price: i32,
    ) -> Result<CartLine, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            INSERT INTO cart_items (user_id, product_id, amount, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, product_id, amount, total_price, created_at, updated_at
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .bind(amount)
        .bind(total_price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("product is already in the cart".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Update a cart line's amount and total price, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        product_id: ProductId,
        amount: i32,
        total_price: i32,
    ) -> Result<CartLine, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            UPDATE cart_items
            SET amount = $1, total_price = $2, updated_at = now()
            WHERE user_id = $3 AND product_id = $4
            RETURNING user_id, product_id, amount, total_price, created_at, updated_at
            ",
        )
        .bind(amount)
        .bind(total_price)
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user_id.as_i32())
        .bind(product_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
