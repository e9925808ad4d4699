//! 产品存储
//!
//! `ProductStore` 是处理器和数据库之间的接缝：生产环境用 `PgProductStore`，
//! 测试用 `MemoryProductStore`。

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::model::{NewProduct, Product};
use crate::infrastructure::database::{DatabaseManager, QueryError, Row, SqlParam};

/// 产品存储接口
///
/// 返回 `Ok(None)` 表示对应 id 的记录不存在。
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, QueryError>;

    async fn fetch(&self, id: i32) -> Result<Option<Product>, QueryError>;

    async fn insert(&self, product: NewProduct) -> Result<Product, QueryError>;

    async fn update(&self, id: i32, product: NewProduct) -> Result<Option<Product>, QueryError>;

    async fn delete(&self, id: i32) -> Result<Option<Product>, QueryError>;

    /// 删除全部记录，返回删除的行数
    async fn delete_all(&self) -> Result<u64, QueryError>;
}

const SELECT_ALL: &str = "SELECT * FROM products ORDER BY id";
const SELECT_ONE: &str = "SELECT * FROM products WHERE id = $1";
const INSERT: &str =
    "INSERT INTO products (name, description, stock, price) VALUES ($1, $2, $3, $4) RETURNING *";
const UPDATE: &str = "UPDATE products SET name = $1, description = $2, stock = $3, price = $4 WHERE id = $5 RETURNING *";
const DELETE_ONE: &str = "DELETE FROM products WHERE id = $1 RETURNING *";
const DELETE_ALL: &str = "DELETE FROM products RETURNING id";

/// 基于 PostgreSQL 的存储
#[derive(Clone)]
pub struct PgProductStore {
    db: DatabaseManager,
}

impl PgProductStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

fn field_params(product: NewProduct) -> Vec<SqlParam> {
    vec![
        SqlParam::Text(Some(product.name)),
        SqlParam::Text(product.description),
        SqlParam::Int(Some(product.stock)),
        SqlParam::Float(Some(product.price)),
    ]
}

fn to_product(row: Row) -> Result<Product, QueryError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

fn first_product(rows: Vec<Row>) -> Result<Option<Product>, QueryError> {
    rows.into_iter().next().map(to_product).transpose()
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, QueryError> {
        self.db
            .query(SELECT_ALL, &[])
            .await?
            .into_iter()
            .map(to_product)
            .collect()
    }

    async fn fetch(&self, id: i32) -> Result<Option<Product>, QueryError> {
        let rows = self.db.query(SELECT_ONE, &[SqlParam::Int(Some(id))]).await?;
        first_product(rows)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, QueryError> {
        let rows = self.db.query(INSERT, &field_params(product)).await?;
        first_product(rows)?.ok_or_else(|| QueryError::new("insert returned no row"))
    }

    async fn update(&self, id: i32, product: NewProduct) -> Result<Option<Product>, QueryError> {
        let mut params = field_params(product);
        params.push(SqlParam::Int(Some(id)));
        let rows = self.db.query(UPDATE, &params).await?;
        first_product(rows)
    }

    async fn delete(&self, id: i32) -> Result<Option<Product>, QueryError> {
        let rows = self.db.query(DELETE_ONE, &[SqlParam::Int(Some(id))]).await?;
        first_product(rows)
    }

    async fn delete_all(&self) -> Result<u64, QueryError> {
        let rows = self.db.query(DELETE_ALL, &[]).await?;
        Ok(rows.len() as u64)
    }
}

#[derive(Debug)]
struct MemoryTable {
    /// `None` 表示 id 已经用到 i32::MAX，和 SERIAL 耗尽一样拒绝插入
    next_id: Option<i32>,
    rows: BTreeMap<i32, Product>,
}

/// 内存存储，id 从 1 开始自增，删除后不复用
#[derive(Debug)]
pub struct MemoryProductStore {
    table: RwLock<MemoryTable>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(MemoryTable {
                next_id: Some(1),
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, QueryError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn fetch(&self, id: i32) -> Result<Option<Product>, QueryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, QueryError> {
        let mut table = self.table.write().await;
        let id = table
            .next_id
            .ok_or_else(|| QueryError::new("products id sequence exhausted"))?;
        table.next_id = id.checked_add(1);

        let product = product.with_id(id);
        table.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, product: NewProduct) -> Result<Option<Product>, QueryError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|existing| {
            *existing = product.with_id(id);
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Product>, QueryError> {
        Ok(self.table.write().await.rows.remove(&id))
    }

    async fn delete_all(&self) -> Result<u64, QueryError> {
        let mut table = self.table.write().await;
        let deleted = table.rows.len() as u64;
        table.rows.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            stock: 10,
            price: 9.99,
        }
    }

    #[test]
    fn test_row_maps_to_product() {
        let row = serde_json::json!({
            "id": 7,
            "name": "Widget",
            "description": null,
            "stock": 3,
            "price": f64::from(9.99f32)
        });
        let Value::Object(row) = row else {
            unreachable!()
        };

        let product = to_product(row).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.description, None);
        assert_eq!(product.price, 9.99f32);
    }

    #[test]
    fn test_field_params_order_matches_columns() {
        let params = field_params(widget());
        assert_eq!(
            params,
            vec![
                SqlParam::Text(Some("Widget".to_string())),
                SqlParam::Text(Some("A widget".to_string())),
                SqlParam::Int(Some(10)),
                SqlParam::Float(Some(9.99)),
            ]
        );
    }

    #[tokio::test]
    async fn test_memory_store_assigns_increasing_ids() {
        let store = MemoryProductStore::new();
        let first = store.insert(widget()).await.unwrap();
        let second = store.insert(widget()).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        store.delete(second.id).await.unwrap();
        let third = store.insert(widget()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_memory_store_id_sequence_exhaustion() {
        let store = MemoryProductStore {
            table: RwLock::new(MemoryTable {
                next_id: Some(i32::MAX),
                rows: BTreeMap::new(),
            }),
        };

        let last = store.insert(widget()).await.unwrap();
        assert_eq!(last.id, i32::MAX);
        assert!(store.insert(widget()).await.is_err());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_update_missing_row() {
        let store = MemoryProductStore::new();
        assert_eq!(store.update(42, widget()).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_delete_all_counts_rows() {
        let store = MemoryProductStore::new();
        store.insert(widget()).await.unwrap();
        store.insert(widget()).await.unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }
}
