use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use todo_server::cache::{ListCache, NullCache, RedisCache};
use todo_server::config::{Config, StoreKind};
use todo_server::store::{MemoryStore, PgStore, TodoStore};
use todo_server::{app, logging, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init_logging()?;

    let store: Arc<dyn TodoStore> = match config.store {
        StoreKind::Postgres => Arc::new(
            PgStore::connect(&config.database_url, config.database_max_connections).await?,
        ),
        StoreKind::Memory => {
            warn!("running with in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    store.ensure_schema().await?;

    let cache = connect_cache(&config).await;
    let state = AppState::new(store, cache).with_cache_ttl(config.cache_ttl);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// The cache is optional: an unreachable Redis degrades to no caching.
async fn connect_cache(config: &Config) -> Arc<dyn ListCache> {
    if !config.cache_enabled {
        info!("list cache disabled");
        return Arc::new(NullCache);
    }
    match RedisCache::connect(&config.redis_url).await {
        Ok(cache) => {
            info!(url = %config.redis_url, "list cache connected");
            Arc::new(cache)
        }
        Err(err) => {
            warn!(error = %err, "redis unavailable, continuing without list cache");
            Arc::new(NullCache)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
