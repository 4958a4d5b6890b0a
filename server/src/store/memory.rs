use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{page_offset, StoreResult, TodoStore, PAGE_SIZE};
use crate::model::{NewTodo, Todo, UpdateTodo};

/// In-process store with the same paging and filtering rules as [`PgStore`].
///
/// Ids start at 1 and are never reused, even after deletes.
///
/// [`PgStore`]: super::PgStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list(&self, page: i64, title: Option<&str>) -> StoreResult<Vec<Todo>> {
        let offset = page_offset(page)?;
        let needle = title.map(str::to_lowercase);
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|todo| match &needle {
                Some(needle) => todo.title.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .skip(offset as usize)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &NewTodo) -> StoreResult<Todo> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = Todo {
            id: inner.last_id,
            title: input.title.clone(),
            description: input.description.clone(),
        };
        inner.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: i64, patch: &UpdateTodo) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let Some(todo) = inner.rows.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(title) = &patch.title {
            todo.title = title.clone();
        }
        if let Some(description) = &patch.description {
            todo.description = description.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let removed = self.inner.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            description: "some description".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let first = store.create(&new_todo("first")).await.unwrap();
        let second = store.create(&new_todo("second")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create(&new_todo("first")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(&new_todo("second")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn list_pages_by_five() {
        let store = MemoryStore::new();
        for i in 0..12 {
            store.create(&new_todo(&format!("todo {i}"))).await.unwrap();
        }
        let page0 = store.list(0, None).await.unwrap();
        let page2 = store.list(2, None).await.unwrap();
        let page3 = store.list(3, None).await.unwrap();
        assert_eq!(page0.len(), 5);
        assert_eq!(page0[0].id, 1);
        assert_eq!(page2.iter().map(|t| t.id).collect::<Vec<_>>(), vec![11, 12]);
        assert!(page3.is_empty());
    }

    #[tokio::test]
    async fn list_filters_title_case_insensitively() {
        let store = MemoryStore::new();
        store.create(&new_todo("Buy MILK")).await.unwrap();
        store.create(&new_todo("walk dog")).await.unwrap();
        store.create(&new_todo("milkshake")).await.unwrap();
        let found = store.list(0, Some("Milk")).await.unwrap();
        let titles: Vec<_> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy MILK", "milkshake"]);
    }

    #[tokio::test]
    async fn list_rejects_negative_page() {
        let store = MemoryStore::new();
        let err = store.list(-1, None).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPage(-1)));
    }

    #[tokio::test]
    async fn update_writes_only_provided_fields() {
        let store = MemoryStore::new();
        let todo = store.create(&new_todo("original")).await.unwrap();
        let patch = UpdateTodo {
            title: None,
            description: Some("updated".to_string()),
        };
        assert_eq!(store.update(todo.id, &patch).await.unwrap(), 1);
        let stored = store.get(todo.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "original");
        assert_eq!(stored.description, "updated");
    }

    #[tokio::test]
    async fn update_missing_id_affects_nothing() {
        let store = MemoryStore::new();
        let affected = store.update(99, &UpdateTodo::default()).await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let todo = store.create(&new_todo("gone soon")).await.unwrap();
        assert_eq!(store.delete(todo.id).await.unwrap(), 1);
        assert_eq!(store.delete(todo.id).await.unwrap(), 0);
        assert!(store.get(todo.id).await.unwrap().is_none());
    }
}
