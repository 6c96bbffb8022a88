//! Router assembly: trivia endpoints, ops endpoints, and the shared layers.

mod common;
mod trivia;
pub use common::common_routes;
pub use trivia::trivia_routes;

use crate::handlers::not_found;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Any origin; GET, POST and DELETE; Content-Type and Authorization headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Full application: ops + trivia routes, JSON 404 for anything unmatched. Bodies over
/// `max_body_bytes` fail JSON extraction and answer with the JSON 400 body.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(trivia_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
