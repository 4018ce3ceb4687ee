use anyhow::Context;
use clap::Args;
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::{app, router};
use crate::config::{AppConfig, DatabaseConfig, Environment, StoreBackend};
use crate::database::{MemoryPropertyStore, PgPropertyStore, PropertyStore};
use crate::middleware::session::JwtSessionResolver;
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep properties in memory instead of PostgreSQL")]
    pub memory: bool,
}

/// Open the configured store once for the life of the process
pub async fn build_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn PropertyStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory property store; data is lost on exit");
            Ok(Arc::new(MemoryPropertyStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgPropertyStore::connect(config)
                .await
                .context("failed to connect to the property database")?;
            store
                .migrate()
                .await
                .context("failed to prepare the properties schema")?;
            Ok(Arc::new(store))
        }
    }
}

pub async fn handle(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.database.backend = StoreBackend::Memory;
    }

    info!("Starting Rentals API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        if config.environment == Environment::Production {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("JWT_SECRET is not set; every request will be treated as anonymous");
    }

    let store = build_store(&config.database).await?;
    let sessions = Arc::new(JwtSessionResolver::new(
        config.security.jwt_secret.clone(),
        config.security.session_cookie.clone(),
    ));
    let state = AppState::new(store.clone(), sessions);
    let limit = config.server.max_request_size_bytes;
    let service = if config.server.enable_request_logging {
        app(state, limit)
    } else {
        router(state, limit)
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Rentals API listening on http://{}", bind_addr);

    let served = axum::serve(listener, service)
        .with_graceful_shutdown(crate::shutdown::signal())
        .await;

    store.close().await;
    served.context("server error")?;

    info!("Rentals API stopped");
    Ok(())
}
