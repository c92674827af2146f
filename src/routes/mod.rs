//! Router assembly: common routes at the root, park routes under `/api`, shared middleware.

mod common;
mod parks;

pub use common::common_routes;
pub use parks::park_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub const API_PREFIX: &str = "/api";
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, park_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
