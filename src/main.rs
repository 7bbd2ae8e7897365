use anyhow::Context;
use tracing_subscriber::EnvFilter;

use svd_recommender::{
    api::{create_router, AppState},
    config::Config,
    data,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("svd_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Nothing is served until the catalog, column index and model are all in place.
    let engine = data::load_engine(&config).map_err(|e| {
        tracing::error!(error = %e, "Startup failed");
        e
    })?;
    tracing::info!(?engine, "Recommendation engine ready");

    let state = AppState::new(engine, &config);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
