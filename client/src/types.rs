//! Wire DTOs for the todo API.
//!
//! # Design
//! These mirror the server's JSON shapes but are defined independently so the
//! client never links axum or sqlx. The integration test catches schema
//! drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Request payload for patching a todo. Omitted fields stay unchanged on the
/// server; `Some(String::new())` clears a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// What the server echoes after an update: the path id and the fields sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatedTodo {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Page and filter for a list request. `page` is zero-based; pages hold at
/// most five records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub title: Option<String>,
}

impl ListQuery {
    pub fn page(page: u64) -> Self {
        Self {
            page: Some(page),
            title: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
