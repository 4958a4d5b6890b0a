//! Todo record and the request payloads that create or patch it.

use serde::{Deserialize, Serialize};

pub const TITLE_MIN_LEN: usize = 3;
pub const DESCRIPTION_MIN_LEN: usize = 5;

/// A persisted todo. `id` is assigned by the store on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Create payload. Unknown fields (including `id`) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

impl NewTodo {
    /// Field length checks applied on create only.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.chars().count() < TITLE_MIN_LEN {
            return Err(format!(
                "title must be at least {TITLE_MIN_LEN} characters"
            ));
        }
        if self.description.chars().count() < DESCRIPTION_MIN_LEN {
            return Err(format!(
                "description must be at least {DESCRIPTION_MIN_LEN} characters"
            ));
        }
        Ok(())
    }
}

/// Patch payload. `None` leaves the column untouched; `Some("")` clears it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// What the update handler echoes back: the path id plus the fields sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedTodo {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatedTodo {
    pub fn echo(id: i64, patch: UpdateTodo) -> Self {
        Self {
            id,
            title: patch.title,
            description: patch.description,
        }
    }
}
