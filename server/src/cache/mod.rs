//! Read-through cache for list pages.
//!
//! Provides a [`ListCache`] trait with three implementations:
//! - [`RedisCache`] - Redis-backed cache used in production
//! - [`MemoryCache`] - in-process cache with expiry, for tests and local runs
//! - [`NullCache`] - no-op implementation when caching is disabled

mod memory_cache;
mod redis_cache;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;

/// Default lifetime of a cached list page.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// String key/value cache with per-entry expiry.
#[async_trait]
pub trait ListCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}

/// Key for one list page. Built from the raw query strings, so `page=00`
/// and `page=0` are cached separately.
pub fn list_key(page: &str, title: &str) -> String {
    format!("todos_page_{page}_title_{title}")
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

#[async_trait]
impl ListCache for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }
}
