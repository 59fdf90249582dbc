//! Module for the prediction API.
//!
//! This module defines the request and response shapes for disease
//! prediction and the HTTP endpoint that serves them.

pub mod handlers;
pub mod routes;
