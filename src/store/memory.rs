use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TaskStore};
use crate::task::TaskRecord;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, TaskRecord>,
    last_id: i64,
}

/// In-memory store for task records. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    table: RwLock<Table>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, mut record: TaskRecord) -> Result<TaskRecord, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        record.id = Some(id);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update_by_id(&self, record: TaskRecord) -> Result<Option<TaskRecord>, StoreError> {
        let id = record.id.ok_or(StoreError::MissingId)?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(existing) => {
                existing.title = record.title;
                existing.description = record.description;
                existing.completed = record.completed;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TaskRecord>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
