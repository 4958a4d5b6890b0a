//! Request handlers for the `/todos` routes.
//!
//! Each handler does at most one cache lookup (list only) and one store call.
//! Writes never touch the cache, so a cached page can lag behind the store
//! until its entry expires.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode, Uri},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::list_key;
use crate::error::ApiError;
use crate::model::{NewTodo, Todo, UpdateTodo, UpdatedTodo};
use crate::store::page_offset;
use crate::AppState;

pub const NO_TODOS_MESSAGE: &str = "No todos found";
pub const DELETED_MESSAGE: &str = "Todo deleted successfully";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub async fn list_todos(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(params) = params?;
    let page_str = match params.page.as_deref() {
        None | Some("") => "0",
        Some(page) => page,
    };
    let title = params.title.as_deref().unwrap_or("");

    let page: i64 = page_str
        .parse()
        .map_err(|e: std::num::ParseIntError| ApiError::BadRequest(e.to_string()))?;
    page_offset(page).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let key = list_key(page_str, title);
    match state.cache.get(&key).await {
        Ok(Some(cached)) => match serde_json::from_str::<Vec<Todo>>(&cached) {
            Ok(todos) => {
                debug!(%key, "list served from cache");
                return Ok(Json(todos));
            }
            Err(err) => warn!(%key, error = %err, "discarding undecodable cache entry"),
        },
        Ok(None) => {}
        Err(err) => warn!(%key, error = %err, "cache read failed"),
    }

    let filter = (!title.is_empty()).then_some(title);
    let todos = state.store.list(page, filter).await?;
    if todos.is_empty() {
        return Err(ApiError::NotFound(NO_TODOS_MESSAGE.to_string()));
    }

    match serde_json::to_string(&todos) {
        Ok(encoded) => {
            if let Err(err) = state.cache.set(&key, &encoded, state.cache_ttl).await {
                warn!(%key, error = %err, "cache write failed");
            }
        }
        Err(err) => warn!(%key, error = %err, "could not encode page for cache"),
    }

    Ok(Json(todos))
}

pub async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    match state.store.get(id).await {
        Ok(Some(todo)) => Ok(Json(todo)),
        Ok(None) => Err(ApiError::NotFound(format!("todo {id} not found"))),
        Err(err) => {
            warn!(id, error = %err, "lookup failed");
            Err(ApiError::NotFound(format!("todo {id} not found")))
        }
    }
}

pub async fn create_todo(
    State(state): State<AppState>,
    input: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = input?;
    input.validate().map_err(ApiError::BadRequest)?;
    let todo = state.store.create(&input).await?;
    debug!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<UpdatedTodo>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = input?;
    let affected = state.store.update(id, &patch).await?;
    debug!(id, affected, "todo updated");
    Ok(Json(UpdatedTodo::echo(id, patch)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Path(id) = id?;
    let affected = state.store.delete(id).await?;
    debug!(id, affected, "todo deleted");
    Ok(Json(MessageBody {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Fallback for paths outside `/todos`.
pub async fn no_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} not allowed on {}", uri.path()))
}
