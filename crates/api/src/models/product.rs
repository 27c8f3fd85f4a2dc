//! Product domain types.

use chrono::{DateTime, Utc};

use sundry_core::ProductId;

/// A catalogue entry (domain type).
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub product_name: String,
    /// Unit price in integer currency units.
    pub price: i32,
    /// Units sold so far.
    pub sales: i32,
    /// Units on hand.
    pub stock: i32,
    /// Free-form note.
    pub note: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
