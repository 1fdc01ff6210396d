use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use medpredict_core::{config::model_dir_from_env_value, CoreConfig};

/// Main entry point for the Disease Prediction System
///
/// Loads the four classifier artifacts once, then serves the web UI (home page plus one form
/// per disease) and the JSON prediction API from the same address.
///
/// A missing or corrupt artifact is fatal: the process exits before binding.
///
/// # Environment Variables
/// - `MEDPREDICT_ADDR`: Server address (default: "0.0.0.0:8501")
/// - `MEDPREDICT_MODEL_DIR`: Directory holding the model artifacts (default: "Models")
/// - `MEDPREDICT_BACKGROUND_URL`: Page background image (optional)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, model loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medpredict_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("MEDPREDICT_ADDR")
        .unwrap_or_else(|_| medpredict_core::DEFAULT_ADDR.into())
        .parse()?;

    let model_dir = model_dir_from_env_value(std::env::var("MEDPREDICT_MODEL_DIR").ok());
    let cfg = CoreConfig::new(model_dir, std::env::var("MEDPREDICT_BACKGROUND_URL").ok())?;
    tracing::info!("++ Loading models from {}", cfg.model_dir().display());
    let state = AppState::load(cfg)?;

    tracing::info!("++ Starting Disease Prediction System on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
