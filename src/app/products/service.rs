//! 产品业务服务

use std::sync::Arc;

use super::{
    model::{NewProduct, Product, ProductPayload},
    store::ProductStore,
};
use crate::core::error::ApiError;

pub const NOT_FOUND: &str = "product not found";

const FETCH_ALL_FAILED: &str = "Failed to fetch products";
const FETCH_FAILED: &str = "Failed to fetch product";
const ADD_FAILED: &str = "Failed to add product";
const UPDATE_FAILED: &str = "Failed to update product";
const DELETE_FAILED: &str = "Failed to delete product";
const DELETE_ALL_FAILED: &str = "Failed to delete products";

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.store
            .list()
            .await
            .map_err(|e| ApiError::storage(FETCH_ALL_FAILED, e))
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, ApiError> {
        self.store
            .fetch(id)
            .await
            .map_err(|e| ApiError::storage(FETCH_FAILED, e))?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, ApiError> {
        let product = NewProduct::try_from(payload)?;
        self.store
            .insert(product)
            .await
            .map_err(|e| ApiError::storage(ADD_FAILED, e))
    }

    /// 整体覆盖，不支持部分更新
    pub async fn update_product(&self, id: i32, payload: ProductPayload) -> Result<Product, ApiError> {
        let product = NewProduct::try_from(payload)?;
        self.store
            .update(id, product)
            .await
            .map_err(|e| ApiError::storage(UPDATE_FAILED, e))?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))
    }

    pub async fn delete_product(&self, id: i32) -> Result<Product, ApiError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| ApiError::storage(DELETE_FAILED, e))?
            .ok_or_else(|| ApiError::not_found(NOT_FOUND))
    }

    pub async fn delete_all_products(&self) -> Result<u64, ApiError> {
        self.store
            .delete_all()
            .await
            .map_err(|e| ApiError::storage(DELETE_ALL_FAILED, e))
    }
}
