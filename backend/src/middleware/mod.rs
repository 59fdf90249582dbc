//! General-purpose middleware for the API.
//!
//! This module contains the reusable layers applied to the Axum router:
//! permissive CORS, so browser front-ends on any origin can call the API,
//! and request tracing.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn apply(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http()).layer(cors())
}
