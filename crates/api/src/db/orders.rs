//! Order repository for database operations.
//!
//! Placing, amending, and cancelling order lines all touch the product's
//! stock and sales counters, so those operations run in a transaction with
//! the product row locked (`SELECT ... FOR UPDATE`). Concurrent orders for
//! the same product serialize on that lock.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use sundry_core::{OrderLineId, ProductId, UserId};

use super::RepositoryError;
use crate::models::OrderLine;

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    id: i32,
    user_id: i32,
    order_number: Uuid,
    product_id: i32,
    amount: i32,
    created_at: DateTime<Utc>,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: OrderLineId::new(row.id),
            user_id: UserId::new(row.user_id),
            order_number: row.order_number,
            product_id: ProductId::new(row.product_id),
            amount: row.amount,
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all order lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, user_id, order_number, product_id, amount, created_at
            FROM orders
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List one user's order lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, user_id, order_number, product_id, amount, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an order line by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderLineId) -> Result<Option<OrderLine>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, user_id, order_number, product_id, amount, created_at
            FROM orders
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Place an order: insert one line per (product, amount) pair under the
    /// given `order_number`, decrementing stock and incrementing sales.
    ///
    /// The whole placement is one transaction; any failure rolls everything
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if a product doesn't exist.
    /// Returns `RepositoryError::Conflict` if a product has insufficient stock.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn place(
        &self,
        user_id: UserId,
        order_number: Uuid,
        lines: &[(ProductId, i32)],
    ) -> Result<Vec<OrderLine>, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(lines.len());

        for &(product_id, amount) in lines {
            let stock = sqlx::query_scalar::<_, i32>(
                r"
                SELECT stock
                FROM products
                WHERE id = $1
                FOR UPDATE
                ",
            )
            .bind(product_id.as_i32())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::NotFound)?;

            if stock < amount {
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for product {product_id}"
                )));
            }

            sqlx::query(
                r"
                UPDATE products
                SET stock = stock - $1, sales = sales + $1, updated_at = now()
                WHERE id = $2
                ",
            )
            .bind(amount)
            .bind(product_id.as_i32())
            .execute(&mut *tx)
            .await?;

            let row = sqlx::query_as::<_, OrderLineRow>(
                r"
                INSERT INTO orders (user_id, order_number, product_id, amount)
                VALUES ($1, $2, $3, $4)
                RETURNING id, user_id, order_number, product_id, amount, created_at
                ",
            )
            .bind(user_id.as_i32())
            .bind(order_number)
            .bind(product_id.as_i32())
            .bind(amount)
            .fetch_one(&mut *tx)
            .await?;

            created.push(row.into());
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Change the amount of an order line, applying the stock/sales delta to
    /// the product in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Conflict` if the product has insufficient
    /// stock for an increased amount.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn amend(
        &self,
        id: OrderLineId,
        new_amount: i32,
    ) -> Result<OrderLine, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let line = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, user_id, order_number, product_id, amount, created_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let delta = new_amount - line.amount;

        let stock = sqlx::query_scalar::<_, i32>(
            r"
            SELECT stock
            FROM products
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(line.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        if stock < delta {
            return Err(RepositoryError::Conflict(format!(
                "insufficient stock for product {}",
                line.product_id
            )));
        }

        sqlx::query(
            r"
            UPDATE products
            SET stock = stock - $1, sales = sales + $1, updated_at = now()
            WHERE id = $2
            ",
        )
        .bind(delta)
        .bind(line.product_id)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, OrderLineRow>(
            r"
            UPDATE orders
            SET amount = $1
            WHERE id = $2
            RETURNING id, user_id, order_number, product_id, amount, created_at
            ",
        )
        .bind(new_amount)
        .bind(id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Cancel an order line: restore the product's stock/sales counters and
    /// delete the row, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn cancel(&self, id: OrderLineId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let line = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT id, user_id, order_number, product_id, amount, created_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query(
            r"
            UPDATE products
            SET stock = stock + $1, sales = sales - $1, updated_at = now()
            WHERE id = $2
            ",
        )
        .bind(line.amount)
        .bind(line.product_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            DELETE FROM orders
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
