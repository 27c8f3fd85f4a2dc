//! Order service.
//!
//! Placement, amendment, and cancellation all keep the product stock/sales
//! counters consistent; the repository runs those writes transactionally
//! with the product rows locked.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use sundry_core::{OrderLineId, ProductId, UserId};

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::db::RepositoryError;
use crate::models::OrderLine;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Amount below one.
    #[error("amount must be at least 1")]
    InvalidAmount,

    /// Placement with no lines.
    #[error("order must contain at least one line")]
    EmptyOrder,

    /// Referenced user doesn't exist.
    #[error("user not found")]
    UserNotFound,

    /// Referenced product doesn't exist.
    #[error("product not found")]
    ProductNotFound,

    /// No order line with the given ID.
    #[error("order line not found")]
    LineNotFound,

    /// Not enough stock for the requested amount.
    #[error("insufficient stock")]
    InsufficientStock,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order service.
pub struct OrderService<'a> {
    users: UserRepository<'a>,
    products: ProductRepository<'a>,
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            products: ProductRepository::new(pool),
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order for one or more (product, amount) lines.
    ///
    /// All lines share a freshly generated order number. Stock is checked
    /// and adjusted atomically; either every line is recorded or none is.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty order or bad amounts,
    /// `UserNotFound`/`ProductNotFound` for dangling references, and
    /// `InsufficientStock` when any line exceeds the product's stock.
    pub async fn place(
        &self,
        user_id: UserId,
        lines: &[(ProductId, i32)],
    ) -> Result<Vec<OrderLine>, OrderError> {
        if lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        if lines.iter().any(|&(_, amount)| amount < 1) {
            return Err(OrderError::InvalidAmount);
        }

        if !self.users.exists(user_id).await? {
            return Err(OrderError::UserNotFound);
        }

        // Pre-flight reference check for a precise error; the repository
        // re-checks under the row lock.
        for &(product_id, _) in lines {
            if self.products.get_by_id(product_id).await?.is_none() {
                return Err(OrderError::ProductNotFound);
            }
        }

        let order_number = Uuid::new_v4();

        self.orders
            .place(user_id, order_number, lines)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::ProductNotFound,
                RepositoryError::Conflict(_) => OrderError::InsufficientStock,
                other => OrderError::Repository(other),
            })
    }

    /// List all order lines.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<OrderLine>, OrderError> {
        let lines = self.orders.list_all().await?;
        Ok(lines)
    }

    /// List one user's order lines.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::UserNotFound` if the user doesn't exist.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderLine>, OrderError> {
        if !self.users.exists(user_id).await? {
            return Err(OrderError::UserNotFound);
        }

        let lines = self.orders.list_for_user(user_id).await?;
        Ok(lines)
    }

    /// Get an order line by ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::LineNotFound` if the line doesn't exist.
    pub async fn get(&self, id: OrderLineId) -> Result<OrderLine, OrderError> {
        self.orders
            .get_by_id(id)
            .await?
            .ok_or(OrderError::LineNotFound)
    }

    /// Change the amount of an order line, adjusting the product's counters
    /// by the delta.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidAmount` for a bad amount,
    /// `OrderError::LineNotFound` for a missing line, and
    /// `OrderError::InsufficientStock` when the increase exceeds stock.
    pub async fn amend(&self, id: OrderLineId, amount: i32) -> Result<OrderLine, OrderError> {
        if amount < 1 {
            return Err(OrderError::InvalidAmount);
        }

        self.orders.amend(id, amount).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::LineNotFound,
            RepositoryError::Conflict(_) => OrderError::InsufficientStock,
            other => OrderError::Repository(other),
        })
    }

    /// Cancel an order line, restoring the product's counters.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::LineNotFound` if the line doesn't exist.
    pub async fn cancel(&self, id: OrderLineId) -> Result<(), OrderError> {
        self.orders.cancel(id).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::LineNotFound,
            other => OrderError::Repository(other),
        })
    }
}
