//! Order domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use sundry_core::{OrderLineId, ProductId, UserId};

/// One product row of a placed order.
///
/// All lines placed in one checkout share an `order_number`. Lines persist
/// after user/product changes (NO ACTION foreign keys).
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// Surrogate primary key.
    pub id: OrderLineId,
    /// User who placed the order.
    pub user_id: UserId,
    /// External order identifier shared by the lines of one checkout.
    pub order_number: Uuid,
    /// Ordered product.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub amount: i32,
    /// When the line was recorded.
    pub created_at: DateTime<Utc>,
}
