//! 基础设施层：配置、数据库、建表、日志

pub mod config;
pub mod database;
pub mod logger;
pub mod schema;
