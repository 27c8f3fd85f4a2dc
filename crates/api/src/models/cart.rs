//! Cart domain types.

use chrono::{DateTime, Utc};

use sundry_core::{ProductId, UserId};

/// A cart line: one (user, product) pair with quantity and total price.
///
/// `total_price` is `product price x amount` at the time the line was
/// written; updating the amount recomputes it.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Owning user.
    pub user_id: UserId,
    /// Product in the cart.
    pub product_id: ProductId,
    /// Quantity.
    pub amount: i32,
    /// Line total in integer currency units.
    pub total_price: i32,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
    /// When the line was last changed.
    pub updated_at: DateTime<Utc>,
}
