//! Cart API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sundry_core::{ProductId, UserId};

use crate::error::Result;
use crate::models::CartLine;
use crate::services::CartService;
use crate::state::AppState;

use super::SuccessResponse;

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", post(add_line))
        .route("/cart/{user_id}", get(list_cart))
        .route(
            "/cart/{user_id}/{product_id}",
            get(get_line).put(update_line).delete(remove_line),
        )
}

/// Request for adding a cart line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartLineRequest {
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub product_id: i32,
    #[serde(default)]
    pub amount: i32,
}

/// Request for changing a cart line's amount.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLineRequest {
    #[serde(default)]
    pub amount: i32,
}

/// A cart line as exposed on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub amount: i32,
    pub total_price: i32,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            user_id: line.user_id,
            product_id: line.product_id,
            amount: line.amount,
            total_price: line.total_price,
        }
    }
}

/// Add a product to a cart.
///
/// # Errors
///
/// 400 for a bad amount, 404 for a missing user/product, 409 when the
/// product is already in the cart or stock is insufficient.
pub async fn add_line(
    State(state): State<AppState>,
    Json(body): Json<AddCartLineRequest>,
) -> Result<Json<CartLineResponse>> {
    let line = CartService::new(state.pool())
        .add(
            UserId::new(body.user_id),
            ProductId::new(body.product_id),
            body.amount,
        )
        .await?;

    Ok(Json(line.into()))
}

/// List a user's cart lines.
///
/// # Errors
///
/// 404 when the user doesn't exist.
pub async fn list_cart(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<CartLineResponse>>> {
    let lines = CartService::new(state.pool()).list(user_id).await?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// Read one cart line.
///
/// # Errors
///
/// 404 when the line doesn't exist.
pub async fn get_line(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> Result<Json<CartLineResponse>> {
    let line = CartService::new(state.pool())
        .get(user_id, product_id)
        .await?;

    Ok(Json(line.into()))
}

/// Change the amount of a cart line.
///
/// # Errors
///
/// 400 for a bad amount, 404 when the line doesn't exist, 409 when stock is
/// insufficient.
pub async fn update_line(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
    Json(body): Json<UpdateCartLineRequest>,
) -> Result<Json<SuccessResponse>> {
    CartService::new(state.pool())
        .update(user_id, product_id, body.amount)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Remove a cart line.
///
/// # Errors
///
/// 404 when the line doesn't exist.
pub async fn remove_line(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> Result<Json<SuccessResponse>> {
    CartService::new(state.pool())
        .remove(user_id, product_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_response_shape() {
        let response = CartLineResponse {
            user_id: UserId::new(1),
            product_id: ProductId::new(2),
            amount: 3,
            total_price: 150,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"userId": 1, "productId": 2, "amount": 3, "totalPrice": 150})
        );
    }
}
