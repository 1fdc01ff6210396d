//! Standalone web server binary.
//!
//! ## Purpose
//! Runs the prediction UI and REST API from the `api-rest` crate on its own.
//!
//! ## Intended use
//! Useful during development of the HTML pages. The workspace's main `medpredict-run` binary
//! serves the same router.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use medpredict_core::{config::model_dir_from_env_value, CoreConfig, ModelRegistry};

/// Main entry point for the standalone REST server
///
/// # Environment Variables
/// - `MEDPREDICT_ADDR`: Server address (default: "0.0.0.0:8501")
/// - `MEDPREDICT_MODEL_DIR`: Directory holding the four model artifacts (default: "Models")
/// - `MEDPREDICT_BACKGROUND_URL`: Page background image (optional)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the model directory or any model artifact is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("medpredict_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDPREDICT_ADDR")
        .unwrap_or_else(|_| medpredict_core::DEFAULT_ADDR.into());

    let model_dir = model_dir_from_env_value(std::env::var("MEDPREDICT_MODEL_DIR").ok());
    let cfg = Arc::new(CoreConfig::new(
        model_dir,
        std::env::var("MEDPREDICT_BACKGROUND_URL").ok(),
    )?);
    tracing::info!("-- Loading models from {}", cfg.model_dir().display());
    let registry = Arc::new(ModelRegistry::load(&cfg)?);

    tracing::info!("-- Starting medpredict REST API on {}", addr);

    let app = router(AppState::new(cfg, registry));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
