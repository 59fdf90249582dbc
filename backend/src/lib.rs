//! Library half of the backend: everything `main` wires together, exposed so
//! integration tests can build the same router in-process.

pub mod api;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod services;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::AppState;
use crate::config::Config;
use crate::errors::StartupError;
use crate::services::ModelManager;

/// Trains the model and builds the router. Nothing is bound yet.
pub fn build_app(config: &Config) -> Result<Router, StartupError> {
    let model = ModelManager::initialize(config)?;
    Ok(api::router(AppState::new(model)))
}

/// Trains the model, then binds and serves until the server stops. The listener
/// is only opened once training has succeeded. Training runs on the blocking
/// pool so it never occupies an async worker.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let training_config = config.clone();
    let app = tokio::task::spawn_blocking(move || build_app(&training_config)).await??;

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
