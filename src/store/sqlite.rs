//! SQLite-backed task store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{StoreError, TaskStore};
use crate::task::TaskRecord;

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER NOT NULL DEFAULT 0
);";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, completed) VALUES (?1, ?2, ?3)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?1, description = ?2, completed = ?3 WHERE id = ?4";
const SELECT_TASKS: &str = "SELECT id, title, description, completed FROM tasks";
const EXISTS_TASK: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Task store over a single SQLite connection.
///
/// rusqlite is blocking, so every call runs on the blocking pool while holding
/// the connection lock.
#[derive(Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// Open (or create) the database file, creating parent directories as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::info!("Opened task database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_TASKS)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Database("connection lock poisoned".to_string()))?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<TaskRecord> {
    Ok(TaskRecord {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
    })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, mut record: TaskRecord) -> Result<TaskRecord, StoreError> {
        self.run(move |conn| {
            conn.execute(
                INSERT_TASK,
                params![record.title, record.description, record.completed],
            )?;
            record.id = Some(conn.last_insert_rowid());
            Ok(record)
        })
        .await
    }

    async fn update_by_id(&self, record: TaskRecord) -> Result<Option<TaskRecord>, StoreError> {
        let id = record.id.ok_or(StoreError::MissingId)?;
        self.run(move |conn| {
            let changed = conn.execute(
                UPDATE_TASK,
                params![record.title, record.description, record.completed, id],
            )?;
            Ok((changed > 0).then_some(record))
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TaskRecord>, StoreError> {
        self.run(move |conn| {
            conn.query_row(
                &format!("{} WHERE id = ?1", SELECT_TASKS),
                params![id],
                record_from_row,
            )
            .optional()
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_TASKS))?;
            let tasks = stmt
                .query_map([], record_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
        .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.run(move |conn| conn.query_row(EXISTS_TASK, params![id], |row| row.get(0)))
            .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        self.run(move |conn| Ok(conn.execute(DELETE_TASK, params![id])? > 0))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(title: &str, description: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: None,
            title: title.to_string(),
            description: description.map(str::to_string),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_sqlite_store_lifecycle() {
        let store = SqliteTaskStore::open_in_memory().unwrap();

        let created = store
            .insert(record("Buy milk", Some("2%")))
            .await
            .unwrap();
        let id = created.id.unwrap();
        assert!(id >= 1);
        assert!(store.exists_by_id(id).await.unwrap());

        let updated = store
            .update_by_id(TaskRecord {
                id: Some(id),
                title: "Buy oat milk".to_string(),
                description: None,
                completed: true,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, Some(id));

        let fetched = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.description, None);
        assert!(fetched.completed);

        assert!(store.delete_by_id(id).await.unwrap());
        assert!(!store.exists_by_id(id).await.unwrap());
        assert_eq!(store.find_by_id(id).await.unwrap(), None);
        assert!(!store.delete_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_none() {
        let store = SqliteTaskStore::open_in_memory().unwrap();
        let ghost = TaskRecord {
            id: Some(99),
            ..record("ghost", None)
        };
        assert_eq!(store.update_by_id(ghost).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("tasks.db");

        {
            let store = SqliteTaskStore::open(&path).unwrap();
            store.insert(record("first", None)).await.unwrap();
            store.insert(record("second", Some("x"))).await.unwrap();
        }

        let store = SqliteTaskStore::open(&path).unwrap();
        let all = store.find_all().await.unwrap();
        let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(all[0].id < all[1].id);
    }
}
