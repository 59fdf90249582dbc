//! Central module for organizing the application's API endpoints.
//!
//! This module acts as a top-level container for the API domains and holds
//! the shared state injected into every handler.

pub mod predict;

use std::sync::Arc;

use axum::Router;
use symptom_model::FittedModel;

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<FittedModel>,
}

impl AppState {
    pub fn new(model: Arc<FittedModel>) -> Self {
        Self { model }
    }
}

/// The complete application router, middleware included.
pub fn router(state: AppState) -> Router {
    let app = Router::new()
        .nest("/api", predict::routes::predict_router())
        .with_state(state);
    crate::middleware::apply(app)
}
