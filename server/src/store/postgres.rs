use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use super::{page_offset, StoreResult, TodoStore, PAGE_SIZE};
use crate::model::{NewTodo, Todo, UpdateTodo};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR NOT NULL,
    description VARCHAR
)";

/// ILIKE pattern matching `needle` anywhere, with LIKE metacharacters in the
/// needle taken literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// PostgreSQL-backed store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        debug!("database pool established");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self, page: i64, title: Option<&str>) -> StoreResult<Vec<Todo>> {
        let offset = page_offset(page)?;
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, COALESCE(description, '') AS description
             FROM todos
             WHERE $1::text IS NULL OR title ILIKE $1 ESCAPE '\\'
             ORDER BY id
             LIMIT $2 OFFSET $3",
        )
        .bind(title.map(contains_pattern))
        .bind(PAGE_SIZE)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, COALESCE(description, '') AS description
             FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn create(&self, input: &NewTodo) -> StoreResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, description) VALUES ($1, $2)
             RETURNING id, title, COALESCE(description, '') AS description",
        )
        .bind(&input.title)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn update(&self, id: i64, patch: &UpdateTodo) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE todos
             SET title = COALESCE($2, title), description = COALESCE($3, description)
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
