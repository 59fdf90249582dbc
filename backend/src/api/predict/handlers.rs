//! Handler functions for the prediction API.
//!
//! The handler parses the request body, lets the fitted model validate and
//! encode the symptom list against its schema, and returns the predicted
//! label. Body and validation failures surface as [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use symptom_model::SymptomValue;
use tracing::debug;

use crate::api::AppState;
use crate::errors::ApiError;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<SymptomValue>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub prediction: String,
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload?;
    let prediction = state.model.predict(&request.symptoms)?;
    debug!(symptoms = ?request.symptoms, %prediction, "prediction served");
    Ok(Json(PredictResponse { prediction }))
}
