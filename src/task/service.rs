//! Task service: business rules between the API and the store.

use thiserror::Error;

use super::mapper;
use super::types::{TaskRecord, TaskView};
use crate::store::{SharedTaskStore, StoreError};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found with id: {0}")]
    NotFound(i64),

    #[error("Task already exists with title: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless orchestration over the injected store. Holds no cached records.
#[derive(Clone)]
pub struct TaskService {
    store: SharedTaskStore,
}

impl TaskService {
    pub fn new(store: SharedTaskStore) -> Self {
        Self { store }
    }

    /// Every stored task, in store order.
    pub async fn list_all(&self) -> Result<Vec<TaskView>, TaskError> {
        tracing::debug!("Retrieving all tasks from store");
        let records = self.store.find_all().await?;
        Ok(records.into_iter().map(TaskView::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<TaskView, TaskError> {
        tracing::debug!("Retrieving task by id: {}", id);
        mapper::to_external(self.store.find_by_id(id).await?).ok_or(TaskError::NotFound(id))
    }

    /// Create when `view.id` is absent, otherwise update the existing task.
    ///
    /// Only the create path rejects case-insensitive duplicate titles. The scan
    /// and the insert are separate store calls, so concurrent creates can race.
    pub async fn save(&self, view: TaskView) -> Result<TaskView, TaskError> {
        let record = TaskRecord::from(view);

        let saved = match record.id {
            None => {
                let title = record.title.to_lowercase();
                let duplicate = self
                    .store
                    .find_all()
                    .await?
                    .iter()
                    .any(|t| t.title.to_lowercase() == title);
                if duplicate {
                    tracing::warn!("Rejected duplicate task title: {}", record.title);
                    return Err(TaskError::AlreadyExists(record.title));
                }
                tracing::info!("Saving new task: {}", record.title);
                self.store.insert(record).await?
            }
            Some(id) => {
                if !self.store.exists_by_id(id).await? {
                    return Err(TaskError::NotFound(id));
                }
                tracing::info!("Updating task with id: {}", id);
                // A concurrent delete between the check and the write still surfaces as NotFound
                self.store
                    .update_by_id(record)
                    .await?
                    .ok_or(TaskError::NotFound(id))?
            }
        };

        Ok(saved.into())
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), TaskError> {
        if !self.store.exists_by_id(id).await? {
            return Err(TaskError::NotFound(id));
        }
        tracing::info!("Deleting task with id: {}", id);
        if !self.store.delete_by_id(id).await? {
            return Err(TaskError::NotFound(id));
        }
        Ok(())
    }
}
