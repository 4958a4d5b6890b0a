//! HTTP service for todo records backed by a relational store and an
//! optional read-through cache.
//!
//! # Overview
//! [`app`] builds the axum router for the five `/todos` routes. Store and
//! cache clients are constructed by the caller and passed in through
//! [`AppState`], so tests can swap in [`store::MemoryStore`] and
//! [`cache::MemoryCache`] without any external services.
//!
//! # Design
//! - List pages are memoized under `todos_page_<page>_title_<title>` for the
//!   configured TTL. Create, update and delete do not invalidate them.
//! - Update is a patch: absent fields are left alone in the store and the
//!   response echoes what the caller sent.
//! - All error bodies share one shape, see [`error::ErrorBody`]. That
//!   includes unknown paths and unsupported methods.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod store;

use std::{sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use cache::{ListCache, NullCache, DEFAULT_TTL};
use store::TodoStore;

pub use model::{NewTodo, Todo, UpdateTodo, UpdatedTodo};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub cache: Arc<dyn ListCache>,
    pub cache_ttl: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, cache: Arc<dyn ListCache>) -> Self {
        Self {
            store,
            cache,
            cache_ttl: DEFAULT_TTL,
        }
    }

    /// State without a cache; every list call goes to the store.
    pub fn uncached(store: Arc<dyn TodoStore>) -> Self {
        Self::new(store, Arc::new(NullCache))
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

pub fn app(state: AppState) -> Router {
    let collection = get(handlers::list_todos).post(handlers::create_todo);
    Router::new()
        .route("/todos", collection.clone())
        .route("/todos/", collection)
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .fallback(handlers::no_route)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn state_defaults_to_thirty_minute_ttl() {
        let state = AppState::uncached(Arc::new(MemoryStore::new()));
        assert_eq!(state.cache_ttl, Duration::from_secs(1800));
    }

    #[test]
    fn with_cache_ttl_overrides_default() {
        let state = AppState::uncached(Arc::new(MemoryStore::new()))
            .with_cache_ttl(Duration::from_secs(5));
        assert_eq!(state.cache_ttl, Duration::from_secs(5));
    }
}
