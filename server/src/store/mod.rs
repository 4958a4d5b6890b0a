//! Record store for todos.
//!
//! Handlers only see the [`TodoStore`] trait. [`PgStore`] is the production
//! backend; [`MemoryStore`] keeps everything in-process for tests and for
//! running the service without a database.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NewTodo, Todo, UpdateTodo};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Fixed number of records per list page.
pub const PAGE_SIZE: i64 = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid page {0}: must be between 0 and the largest addressable page")]
    InvalidPage(i64),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations the handlers need. Implementations must be safe to
/// share across request tasks.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Create the backing table if it does not exist yet.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// One page of todos ordered by id. `title` is a case-insensitive
    /// substring filter.
    async fn list(&self, page: i64, title: Option<&str>) -> StoreResult<Vec<Todo>>;

    async fn get(&self, id: i64) -> StoreResult<Option<Todo>>;

    /// Insert and return the record with its assigned id.
    async fn create(&self, input: &NewTodo) -> StoreResult<Todo>;

    /// Write the provided fields of `patch`. Returns rows affected.
    async fn update(&self, id: i64, patch: &UpdateTodo) -> StoreResult<u64>;

    /// Returns rows affected; zero is not an error.
    async fn delete(&self, id: i64) -> StoreResult<u64>;
}

/// Row offset of the first record on `page`.
pub fn page_offset(page: i64) -> StoreResult<i64> {
    if page < 0 {
        return Err(StoreError::InvalidPage(page));
    }
    page.checked_mul(PAGE_SIZE)
        .ok_or(StoreError::InvalidPage(page))
}
