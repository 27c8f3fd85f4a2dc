//! Order API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sundry_core::{OrderLineId, ProductId, UserId};

use crate::error::Result;
use crate::models::OrderLine;
use crate::services::OrderService;
use crate::state::AppState;

use super::SuccessResponse;

/// Build the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order", post(place_order).get(list_orders))
        .route("/order/user/{user_id}", get(list_user_orders))
        .route(
            "/order/{id}",
            get(get_line).put(amend_line).delete(cancel_line),
        )
}

/// One (product, amount) pair of an order placement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(default)]
    pub product_id: i32,
    #[serde(default)]
    pub amount: i32,
}

/// Request for placing an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Request for amending an order line's amount.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmendOrderLineRequest {
    #[serde(default)]
    pub amount: i32,
}

/// An order line as exposed on the wire.
///
/// `orderId` is the external identifier shared by the lines of one
/// placement; `id` is the line's own key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub id: OrderLineId,
    pub user_id: UserId,
    pub order_id: Uuid,
    pub product_id: ProductId,
    pub amount: i32,
    pub create_time: DateTime<Utc>,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            user_id: line.user_id,
            order_id: line.order_number,
            product_id: line.product_id,
            amount: line.amount,
            create_time: line.created_at,
        }
    }
}

/// Place an order.
///
/// # Errors
///
/// 400 for an empty order or bad amounts, 404 for a missing user/product,
/// 409 for insufficient stock.
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Json<Vec<OrderLineResponse>>> {
    let lines: Vec<(ProductId, i32)> = body
        .items
        .iter()
        .map(|item| (ProductId::new(item.product_id), item.amount))
        .collect();

    let created = OrderService::new(state.pool())
        .place(UserId::new(body.user_id), &lines)
        .await?;

    Ok(Json(created.into_iter().map(Into::into).collect()))
}

/// List all order lines.
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderLineResponse>>> {
    let lines = OrderService::new(state.pool()).list().await?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// List a user's order lines.
///
/// # Errors
///
/// 404 when the user doesn't exist.
pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<OrderLineResponse>>> {
    let lines = OrderService::new(state.pool())
        .list_for_user(user_id)
        .await?;

    Ok(Json(lines.into_iter().map(Into::into).collect()))
}

/// Read one order line.
///
/// # Errors
///
/// 404 when the line doesn't exist.
pub async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<OrderLineId>,
) -> Result<Json<OrderLineResponse>> {
    let line = OrderService::new(state.pool()).get(id).await?;

    Ok(Json(line.into()))
}

/// Amend an order line's amount.
///
/// # Errors
///
/// 400 for a bad amount, 404 when the line doesn't exist, 409 for
/// insufficient stock.
pub async fn amend_line(
    State(state): State<AppState>,
    Path(id): Path<OrderLineId>,
    Json(body): Json<AmendOrderLineRequest>,
) -> Result<Json<SuccessResponse>> {
    OrderService::new(state.pool()).amend(id, body.amount).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Cancel an order line.
///
/// # Errors
///
/// 404 when the line doesn't exist.
pub async fn cancel_line(
    State(state): State<AppState>,
    Path(id): Path<OrderLineId>,
) -> Result<Json<SuccessResponse>> {
    OrderService::new(state.pool()).cancel(id).await?;

    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_shape() {
        let body: PlaceOrderRequest = serde_json::from_str(
            r#"{"userId": 1, "items": [{"productId": 2, "amount": 3}]}"#,
        )
        .unwrap();

        assert_eq!(body.user_id, 1);
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items.first().map(|i| (i.product_id, i.amount)), Some((2, 3)));
    }

    #[test]
    fn test_order_line_response_field_names() {
        let response = OrderLineResponse {
            id: OrderLineId::new(1),
            user_id: UserId::new(2),
            order_id: Uuid::nil(),
            product_id: ProductId::new(3),
            amount: 4,
            create_time: DateTime::<Utc>::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&response).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("orderId"));
        assert!(object.contains_key("createTime"));
        assert!(object.contains_key("productId"));
    }
}
