//! Product service.

use sqlx::PgPool;
use thiserror::Error;

use sundry_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::Product;

/// Longest product name the schema accepts.
const MAX_NAME_LENGTH: usize = 20;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Product name missing or empty.
    #[error("product name is required")]
    MissingName,

    /// Product name over the column limit.
    #[error("product name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Negative price.
    #[error("product price must not be negative")]
    NegativePrice,

    /// Negative stock.
    #[error("product stock must not be negative")]
    NegativeStock,

    /// Product not found.
    #[error("product not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Product service.
pub struct ProductService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ProductService<'a> {
    /// Create a new product service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is missing/too long or the
    /// price/stock is negative.
    pub async fn create(
        &self,
        product_name: &str,
        price: i32,
        stock: i32,
        note: Option<&str>,
    ) -> Result<Product, ProductError> {
        let name = validate_name(product_name)?;
        validate_counts(price, stock)?;

        let product = self.products.create(name, price, stock, note).await?;
        Ok(product)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if the product doesn't exist.
    pub async fn get(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.products.list_all().await?;
        Ok(products)
    }

    /// Update a product's name, price, stock, and note.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields.
    /// Returns `ProductError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        product_name: &str,
        price: i32,
        stock: i32,
        note: Option<&str>,
    ) -> Result<Product, ProductError> {
        let name = validate_name(product_name)?;
        validate_counts(price, stock)?;

        self.products
            .update(id, name, price, stock, note)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ProductError::NotFound,
                other => ProductError::Repository(other),
            })
    }

    /// Delete a product. Cart lines referencing it cascade away.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        self.products.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => ProductError::NotFound,
            other => ProductError::Repository(other),
        })
    }
}

/// Validate and trim a product name.
fn validate_name(product_name: &str) -> Result<&str, ProductError> {
    let name = product_name.trim();

    if name.is_empty() {
        return Err(ProductError::MissingName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ProductError::NameTooLong);
    }

    Ok(name)
}

/// Validate price and stock are non-negative.
const fn validate_counts(price: i32, stock: i32) -> Result<(), ProductError> {
    if price < 0 {
        return Err(ProductError::NegativePrice);
    }

    if stock < 0 {
        return Err(ProductError::NegativeStock);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  tea  ").unwrap(), "tea");
    }

    #[test]
    fn test_validate_name_empty() {
        assert!(matches!(validate_name("   "), Err(ProductError::MissingName)));
    }

    #[test]
    fn test_validate_name_too_long() {
        let long = "a".repeat(21);
        assert!(matches!(
            validate_name(&long),
            Err(ProductError::NameTooLong)
        ));
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_counts(0, 0).is_ok());
        assert!(matches!(
            validate_counts(-1, 0),
            Err(ProductError::NegativePrice)
        ));
        assert!(matches!(
            validate_counts(0, -1),
            Err(ProductError::NegativeStock)
        ));
    }
}
