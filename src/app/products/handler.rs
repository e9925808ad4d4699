//! 产品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use std::sync::Arc;
use tracing::info;

use super::{
    model::{Product, ProductPayload},
    service::ProductService,
    store::ProductStore,
};
use crate::core::{error::ApiError, response::MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            product_service: ProductService::new(store),
        }
    }
}

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(payload) = payload?;
    let product = state.product_service.create_product(payload).await?;
    info!("Created product: {} ({})", product.name, product.id);
    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let product = state.product_service.update_product(id, payload).await?;
    info!("Updated product: {} ({})", product.name, product.id);
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.product_service.delete_product(id).await?;
    info!("Deleted product: {}", id);
    Ok(Json(MessageResponse::new("product deleted successfully")))
}

pub async fn delete_all_products(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.product_service.delete_all_products().await?;
    info!("Deleted {} products", deleted);
    Ok(Json(
        MessageResponse::new("products deleted successfully").with_deleted(deleted),
    ))
}
