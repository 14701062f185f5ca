//! Task persistence.
//!
//! Provides:
//! - The `TaskStore` CRUD contract used by the task service
//! - A SQLite backend for real deployments
//! - An in-memory backend for tests and throwaway instances

mod memory;
mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StorageMode;
use crate::task::TaskRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Cannot update a task record without an id")]
    MissingId,

    #[error("Storage worker failed: {0}")]
    Join(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e.to_string())
    }
}

/// Id-keyed CRUD table of task records.
///
/// Concurrency guarantees are whatever the backend provides natively; callers
/// get no isolation across separate calls.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a record without id. The store assigns the id and returns the stored record.
    async fn insert(&self, record: TaskRecord) -> Result<TaskRecord, StoreError>;

    /// Overwrite title, description and completed of the row matching `record.id`.
    ///
    /// Returns `None` when no such row exists.
    async fn update_by_id(&self, record: TaskRecord) -> Result<Option<TaskRecord>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<TaskRecord>, StoreError>;

    /// All records in ascending id order.
    async fn find_all(&self) -> Result<Vec<TaskRecord>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
}

/// Shared store handle injected into the service.
pub type SharedTaskStore = Arc<dyn TaskStore>;

/// Open the backend selected by configuration.
pub fn open(mode: &StorageMode) -> Result<SharedTaskStore, StoreError> {
    match mode {
        StorageMode::Sqlite { path } => Ok(Arc::new(SqliteTaskStore::open(path)?)),
        StorageMode::Memory => {
            tracing::warn!("Using in-memory task storage; tasks are lost on shutdown");
            Ok(Arc::new(InMemoryTaskStore::new()))
        }
    }
}
