use std::sync::Arc;

use lambda_http::{run, service_fn, Error};
use petskub_shared::{AppState, Config};
use tracing_subscriber::{fmt, EnvFilter};

mod http_handler;
use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();

    let config = Config::load().map_err(|e| {
        tracing::error!("❌ Configuration error: {}", e);
        e
    })?;
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!("✅ Share lambda ready");

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { function_handler(event, state).await }
    }))
    .await
}
