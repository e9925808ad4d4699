//! 启动时建表
//!
//! 建表语句幂等，可以重复执行。

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::database::{DatabaseManager, QueryError};

pub const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        stock INTEGER NOT NULL,
        price REAL NOT NULL
    )
"#;

pub async fn ensure_products_table(db: &DatabaseManager) -> Result<(), QueryError> {
    db.execute(CREATE_PRODUCTS_TABLE, &[]).await?;
    Ok(())
}

/// 后台建表，不阻塞监听端口；失败只记日志，之后的查询会各自报错
pub fn spawn_bootstrap(db: DatabaseManager) -> JoinHandle<()> {
    tokio::spawn(async move {
        match ensure_products_table(&db).await {
            Ok(()) => info!("Products table is ready."),
            Err(err) => error!(error = %err, "Error creating products table"),
        }
    })
}
