use anyhow::Context;
use casotto_api::{app, AppState};
use casotto_core::BeachService;
use casotto_store::app_config::{Config, StorageBackend};
use casotto_store::{DbClient, Repositories};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casotto_api=debug,casotto_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Casotto API on port {}", config.server.port);

    let (repositories, rules) = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            let rules = db
                .fetch_business_rules(config.business_rules.clone())
                .await
                .context("Failed to load business rules")?;
            (Repositories::postgres(&db), rules)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            (Repositories::memory(), config.business_rules.clone())
        }
    };
    tracing::info!("Half-day overlap policy: {:?}", rules.half_day_overlap);

    let beach = BeachService::new(
        repositories.umbrellas,
        repositories.prices,
        repositories.reservations,
        Arc::new(config.inventory.to_manager()),
    )
    .with_half_day_overlap(rules.half_day_overlap);

    let app = app(AppState::new(beach));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
}
