//! Defines the HTTP routes for disease prediction.
//!
//! These routes map the prediction path to its handler and are nested under
//! `/api` by the main router.

use axum::{routing::post, Router};

use super::handlers::predict;
use crate::api::AppState;

pub fn predict_router() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}
