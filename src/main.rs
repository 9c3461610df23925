use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use techfeed_api::{
    config::Config,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("techfeed_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        classifier = %config.classifier_api_url,
        search = %config.search_api_url,
        tracking = %config.tracking_api_url,
        max_attempts = config.retry_max_attempts,
        "Configuration loaded"
    );

    let (state, tracker_handle) = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracker_handle.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
