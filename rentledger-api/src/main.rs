//! # RentLedger API Server
//!
//! Serves the owner and tenant HTTP API over either the in-memory record
//! store or PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=$(openssl rand -hex 32) SEED_DEMO_DATA=true cargo run -p rentledger-api
//! ```

use std::sync::Arc;

use anyhow::Context;
use rentledger_api::app::{build_router, AppState};
use rentledger_api::config::{Config, LogFormat, StoreBackend};
use rentledger_shared::db::migrations::run_migrations;
use rentledger_shared::db::pool::{create_pool, DatabaseConfig};
use rentledger_shared::ledger::period::Period;
use rentledger_shared::store::seed::seed_demo_data;
use rentledger_shared::store::{MemoryStore, PgStore, RecordStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        "RentLedger API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let store = open_store(&config).await?;

    if config.seed_demo_data {
        match seed_demo_data(store.as_ref(), Period::current()).await? {
            Some(owner_id) => tracing::info!(%owner_id, "Demo data seeded"),
            None => tracing::debug!("Demo data already present"),
        }
    }

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rentledger_api=info,rentledger_shared=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RecordStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .store
                .database_url
                .clone()
                .context("DATABASE_URL is required for the postgres store")?;

            let pool = create_pool(&DatabaseConfig {
                url,
                max_connections: config.store.max_connections,
                ..Default::default()
            })
            .await
            .context("failed to connect to PostgreSQL")?;
            run_migrations(&pool).await.context("failed to run migrations")?;

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
