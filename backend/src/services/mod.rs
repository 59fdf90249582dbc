//! Module for core business logic services.
//!
//! This module encapsulates services that perform the application's work
//! outside the HTTP layer, such as loading the dataset and fitting the
//! classifier that every request is answered from.

pub mod model_manager;

pub use model_manager::ModelManager;
