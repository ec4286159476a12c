use anyhow::Context;
use skybook_api::{
    app,
    state::{AppState, AuthConfig},
};
use skybook_store::{app_config::Config, seed_sample_data, FileRecordStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skybook_api=debug,skybook_workflow=info,skybook_store=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting SkyBook API on port {}", config.server.port);

    let store = FileRecordStore::open(&config.storage.path)
        .await
        .with_context(|| format!("Failed to open data directory {}", config.storage.path))?;
    tracing::info!("Storing records under {}", store.root().display());

    let app_state = AppState::new(
        Arc::new(store),
        AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        config.cors.allowed_origins.clone(),
    );

    if config.storage.seed_sample_data {
        seed_sample_data(app_state.flight_repo.as_ref(), app_state.user_repo.as_ref())
            .await
            .context("Failed to seed sample data")?;
    }

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
