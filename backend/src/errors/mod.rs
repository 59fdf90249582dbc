//! Global application error types and handlers.
//!
//! This module defines the error types used across the backend: fatal startup
//! failures, which stop the process before it ever listens, and per-request
//! failures, which are turned into a structured JSON response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use symptom_model::ClassifierError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("model initialization failed: {0}")]
    Model(#[from] ClassifierError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model initialization task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Prediction(#[from] ClassifierError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Prediction(err) => err.kind(),
        }
    }

    /// Every request failure answers 500; only the body distinguishes causes.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), error = %self, "prediction request failed");
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
