use bilibridge::{
    config::{ClientConfig, ServerConfig},
    server::{AppState, create_router},
    service::BilibiliService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bilibridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env();
    let client_config = ClientConfig::from_env();
    let service = BilibiliService::new(&client_config)?;

    if server_config.refresh_signing_keys {
        if let Err(e) = service.refresh_signing_keys().await {
            tracing::warn!("Could not refresh signing keys, using configured pair: {}", e);
        }
    }

    let app = create_router(AppState::new(service), &server_config.cors_allowed_origin)?;

    let addr = server_config.addr();
    tracing::info!("Starting bilibridge server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
