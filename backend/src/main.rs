//! Main entry point for the symptom prediction backend.
//!
//! This file initializes logging, loads configuration, trains the classifier
//! and starts the Axum web server. Any startup failure is logged and ends the
//! process with a non-zero status before a listener is bound.

use backend::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    if let Err(err) = backend::run(config).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
