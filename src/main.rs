use anyhow::Context;
use lightscore::{build_router, load_config, services::spawn_sweeper, utils::init_tracing, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

const SWEEP_EVERY: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = load_config().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    if config.pagespeed.api_key.is_none() {
        error!("API_KEY is missing from the environment; audit requests will fail until it is set");
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let bind_addr = config.server.bind_addr.clone();
    let shared_state = Arc::new(AppState::new(config, http));
    spawn_sweeper(shared_state.progress.clone(), SWEEP_EVERY);

    let app = build_router(shared_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
