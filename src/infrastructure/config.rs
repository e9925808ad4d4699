//! 配置加载
//!
//! 所有配置来自环境变量，启动时会先尝试读取当前目录下的 `.env`。

use std::{str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 为空时由 sqlx 读取 PGHOST / PGPORT / PGUSER / PGPASSWORD / PGDATABASE
    pub url: Option<String>,
    pub max_connections: u32,
    /// 从连接池取连接的等待上限，超时后查询失败
    pub acquire_timeout: Duration,
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构造配置，测试时传入闭包即可
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 3000)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    get("DATABASE_MAX_CONNECTIONS"),
                    10,
                )?,
                acquire_timeout: Duration::from_secs(parse_or(
                    "DATABASE_ACQUIRE_TIMEOUT_SECS",
                    get("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                    8,
                )?),
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
