//! 应用层：路由装配

pub mod products;

use axum::{extract::Request, middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{info_span, Level};

use crate::core::middleware::{request_id_middleware, request_id_of};
use products::{handler, AppState};

pub const PRODUCTS_PATH: &str = "/api/v1/products";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::hello))
        .route(
            PRODUCTS_PATH,
            get(handler::list_products)
                .post(handler::create_product)
                .delete(handler::delete_all_products),
        )
        .route(
            "/api/v1/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id_of(req),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // 最外层，TraceLayer 建 span 时请求头里已经有 request id
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
