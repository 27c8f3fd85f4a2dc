//! Product API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sundry_core::ProductId;

use crate::error::Result;
use crate::models::Product;
use crate::services::ProductService;
use crate::state::AppState;

use super::SuccessResponse;

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product", post(create_product).get(list_products))
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Request for creating or updating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_price: i32,
    #[serde(default)]
    pub product_stock: i32,
    #[serde(default)]
    pub note: Option<String>,
}

/// A product as exposed on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: i32,
    pub product_sales: i32,
    pub product_stock: i32,
    pub note: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.id,
            product_name: product.product_name,
            product_price: product.price,
            product_sales: product.sales,
            product_stock: product.stock,
            note: product.note,
        }
    }
}

/// Create a product.
///
/// # Errors
///
/// 400 for a missing name or negative price/stock.
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let product = ProductService::new(state.pool())
        .create(
            &body.product_name,
            body.product_price,
            body.product_stock,
            body.note.as_deref(),
        )
        .await?;

    Ok(Json(product.into()))
}

/// List all products.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductService::new(state.pool()).list().await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Read one product.
///
/// # Errors
///
/// 404 when the id doesn't exist.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = ProductService::new(state.pool()).get(id).await?;

    Ok(Json(product.into()))
}

/// Update a product.
///
/// # Errors
///
/// 400 for bad fields, 404 when the id doesn't exist.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<SuccessResponse>> {
    ProductService::new(state.pool())
        .update(
            id,
            &body.product_name,
            body.product_price,
            body.product_stock,
            body.note.as_deref(),
        )
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Delete a product.
///
/// # Errors
///
/// 404 when the id doesn't exist.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<SuccessResponse>> {
    ProductService::new(state.pool()).delete(id).await?;

    Ok(Json(SuccessResponse::ok()))
}
