use mobile_gateway::{app, config::Config, handlers::login::LOGIN_PATH, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mobile_gateway=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        upstream = %config.upstream.base_url,
        same_site = ?config.cookie.same_site,
        pages = %config.pages.dir.display(),
        "Configuration loaded"
    );

    let bind_address = config.bind_address();
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Mobile demo server running at http://{}{}", bind_address, LOGIN_PATH);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
