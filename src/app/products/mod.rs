//! 产品 CRUD

pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub use handler::AppState;
pub use model::{NewProduct, Product, ProductPayload};
pub use store::{MemoryProductStore, PgProductStore, ProductStore};
