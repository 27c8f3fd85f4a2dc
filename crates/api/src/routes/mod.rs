//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database connectivity)
//!
//! # Users
//! POST   /user                 - Create user
//! POST   /user/login           - Login
//! GET    /user                 - List users
//! GET    /user/{id}            - Read user
//! PUT    /user/{id}            - Update user
//! DELETE /user/{id}            - Delete user
//!
//! # Products
//! POST   /product              - Create product
//! GET    /product              - List products
//! GET    /product/{id}         - Read product
//! PUT    /product/{id}         - Update product
//! DELETE /product/{id}         - Delete product
//!
//! # Cart
//! POST   /cart                        - Add cart line
//! GET    /cart/{userId}               - List a user's cart
//! GET    /cart/{userId}/{productId}   - Read cart line
//! PUT    /cart/{userId}/{productId}   - Update cart line
//! DELETE /cart/{userId}/{productId}   - Remove cart line
//!
//! # Orders
//! POST   /order                - Place order
//! GET    /order                - List all order lines
//! GET    /order/user/{userId}  - List a user's order lines
//! GET    /order/{id}           - Read order line
//! PUT    /order/{id}           - Amend order line
//! DELETE /order/{id}           - Cancel order line
//! ```
//!
//! Field names on the wire are camelCase (`userId`, `productName`, ...);
//! error bodies are `{"message": "..."}`, update/delete successes are
//! `{"success": true}`.

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Response for update/delete operations.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true`; failures are reported as error bodies instead.
    pub success: bool,
}

impl SuccessResponse {
    /// A successful outcome.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Build the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(products::router())
        .merge(carts::router())
        .merge(orders::router())
}
