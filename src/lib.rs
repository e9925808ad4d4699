//! # products-api
//!
//! 基于 Axum + SQLx 的产品 CRUD 服务：
//! - `core`：错误类型、响应结构、中间件
//! - `infrastructure`：配置、数据库访问、建表、日志
//! - `app`：路由和产品处理器

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::router;
