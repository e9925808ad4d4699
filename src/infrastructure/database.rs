//! 数据库基础设施
//!
//! `DatabaseManager` 持有连接池，`query` 执行带位置参数的 SQL，
//! 每一行转换成 列名 -> JSON 值 的映射。

use serde_json::{Map, Value};
use sqlx::{
    postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions, PgRow},
    query::Query,
    Column, Postgres, Row as _, TypeInfo, ValueRef,
};
use std::{error::Error as StdError, str::FromStr};
use thiserror::Error;

use super::config::DatabaseConfig;

/// 一行查询结果
pub type Row = Map<String, Value>;

/// 查询失败，不区分连接、语法还是约束错误
#[derive(Debug, Error)]
#[error("query failed: {source}")]
pub struct QueryError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl QueryError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err)
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err)
    }
}

/// 位置参数，按 `$1..$n` 的顺序绑定
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(Option<i32>),
    Float(Option<f32>),
    Text(Option<String>),
}

#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// 延迟建立连接，数据库不可用时启动不会失败，请求会返回 500
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url)?,
            None => PgConnectOptions::new(),
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// 执行语句并返回所有结果行；没有结果集的语句返回空 Vec
    pub async fn query(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Row>, QueryError> {
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| decode_row(row).map_err(QueryError::from))
            .collect()
    }

    /// 执行语句，返回受影响的行数
    pub async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<u64, QueryError> {
        let result = bind_params(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            SqlParam::Int(value) => query.bind(*value),
            SqlParam::Float(value) => query.bind(*value),
            SqlParam::Text(value) => query.bind(value.as_deref()),
        };
    }
    query
}

fn decode_row(row: &PgRow) -> Result<Row, sqlx::Error> {
    let mut map = Map::with_capacity(row.columns().len());

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INT2" => Value::from(row.try_get::<i16, _>(index)?),
                "INT4" => Value::from(row.try_get::<i32, _>(index)?),
                "INT8" => Value::from(row.try_get::<i64, _>(index)?),
                "FLOAT4" => Value::from(row.try_get::<f32, _>(index)?),
                "FLOAT8" => Value::from(row.try_get::<f64, _>(index)?),
                "BOOL" => Value::from(row.try_get::<bool, _>(index)?),
                "TEXT" | "VARCHAR" | "NAME" | "BPCHAR" | "CHAR" => {
                    Value::from(row.try_get::<String, _>(index)?)
                }
                other => {
                    return Err(sqlx::Error::ColumnDecode {
                        index: column.name().to_string(),
                        source: format!("unsupported column type {other}").into(),
                    })
                }
            }
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}
