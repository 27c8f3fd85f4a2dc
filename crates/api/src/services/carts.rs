//! Cart service.
//!
//! Cart lines carry a denormalized `total_price`; every write recomputes it
//! from the current product price so the invariant
//! `total_price = price x amount` holds at write time.

use sqlx::PgPool;
use thiserror::Error;

use sundry_core::{ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::products::ProductRepository;
use crate::db::users::UserRepository;
use crate::db::RepositoryError;
use crate::models::CartLine;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Amount below one.
    #[error("amount must be at least 1")]
    InvalidAmount,

    /// Amount would overflow the line total.
    #[error("amount is out of range")]
    AmountOutOfRange,

    /// Referenced user doesn't exist.
    #[error("user not found")]
    UserNotFound,

    /// Referenced product doesn't exist.
    #[error("product not found")]
    ProductNotFound,

    /// No cart line for the (user, product) pair.
    #[error("cart line not found")]
    LineNotFound,

    /// Product already has a cart line for this user.
    #[error("product is already in the cart")]
    AlreadyInCart,

    /// Not enough stock for the requested amount.
    #[error("insufficient stock")]
    InsufficientStock,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    users: UserRepository<'a>,
    products: ProductRepository<'a>,
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            products: ProductRepository::new(pool),
            carts: CartRepository::new(pool),
        }
    }

    /// Add a product to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount, `UserNotFound`/
    /// `ProductNotFound` for dangling references, `InsufficientStock` when
    /// the amount exceeds stock, and `AlreadyInCart` when the pair already
    /// has a line.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        amount: i32,
    ) -> Result<CartLine, CartError> {
        let total_price = self.check_line(user_id, product_id, amount).await?;

        self.carts
            .insert(user_id, product_id, amount, total_price)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CartError::AlreadyInCart,
                other => CartError::Repository(other),
            })
    }

    /// List one user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UserNotFound` if the user doesn't exist.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        if !self.users.exists(user_id).await? {
            return Err(CartError::UserNotFound);
        }

        let lines = self.carts.list_for_user(user_id).await?;
        Ok(lines)
    }

    /// Get a single cart line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if the line doesn't exist.
    pub async fn get(&self, user_id: UserId, product_id: ProductId) -> Result<CartLine, CartError> {
        self.carts
            .get(user_id, product_id)
            .await?
            .ok_or(CartError::LineNotFound)
    }

    /// Change the amount of a cart line, recomputing its total price.
    ///
    /// # Errors
    ///
    /// Same validation as [`CartService::add`], plus `LineNotFound` when the
    /// pair has no line.
    pub async fn update(
        &self,
        user_id: UserId,
        product_id: ProductId,
        amount: i32,
    ) -> Result<CartLine, CartError> {
        let total_price = self.check_line(user_id, product_id, amount).await?;

        self.carts
            .update(user_id, product_id, amount, total_price)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::LineNotFound,
                other => CartError::Repository(other),
            })
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if the line doesn't exist.
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<(), CartError> {
        self.carts
            .delete(user_id, product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::LineNotFound,
                other => CartError::Repository(other),
            })
    }

    /// Shared validation for add/update: amount, references, stock. Returns
    /// the recomputed line total.
    async fn check_line(
        &self,
        user_id: UserId,
        product_id: ProductId,
        amount: i32,
    ) -> Result<i32, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount);
        }

        if !self.users.exists(user_id).await? {
            return Err(CartError::UserNotFound);
        }

        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        if amount > product.stock {
            return Err(CartError::InsufficientStock);
        }

        let total_price = product
            .price
            .checked_mul(amount)
            .ok_or(CartError::AmountOutOfRange)?;

        Ok(total_price)
    }
}
