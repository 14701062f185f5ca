//! Task API endpoints.
//!
//! - `GET    /api/tasks`      list tasks
//! - `GET    /api/tasks/:id`  get one task
//! - `POST   /api/tasks`      create a task
//! - `PUT    /api/tasks/:id`  replace a task's fields
//! - `DELETE /api/tasks/:id`  delete a task

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::error::ApiError;
use super::routes::AppState;
use crate::task::TaskView;

/// Create task routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
}

fn path_id(id: Result<Path<i64>, PathRejection>, path: &str) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::bad_request(e.body_text(), path))
}

fn valid_body(
    body: Result<Json<TaskView>, JsonRejection>,
    path: &str,
) -> Result<TaskView, ApiError> {
    let Json(view) = body.map_err(|e| ApiError::bad_request(e.body_text(), path))?;
    view.validate()
        .map_err(|errors| ApiError::validation(&errors, path))?;
    Ok(view)
}

/// GET /api/tasks - List all tasks.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<TaskView>>, ApiError> {
    tracing::info!("Fetching all tasks");
    state
        .tasks
        .list_all()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_task_error(e, uri.path()))
}

/// GET /api/tasks/:id - Get a task by id.
async fn get_task(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskView>, ApiError> {
    let path = uri.path();
    let id = path_id(id, path)?;
    if id < 1 {
        return Err(ApiError::bad_request(
            "id: must be greater than or equal to 1",
            path,
        ));
    }

    tracing::info!("Fetching task with id: {}", id);
    state
        .tasks
        .get_by_id(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_task_error(e, path))
}

/// POST /api/tasks - Create a task. Any id in the body is ignored.
async fn create_task(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<TaskView>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let path = uri.path();
    let mut view = valid_body(body, path)?;
    view.id = None;

    tracing::info!("Creating new task: {}", view.title);
    let created = state
        .tasks
        .save(view)
        .await
        .map_err(|e| ApiError::from_task_error(e, path))?;
    let id = created
        .id
        .ok_or_else(|| ApiError::internal("Created task has no id", path))?;

    let location = format!("{}/{}", path.trim_end_matches('/'), id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/tasks/:id - Replace title, description and completed of a task.
async fn update_task(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TaskView>, JsonRejection>,
) -> Result<Json<TaskView>, ApiError> {
    let path = uri.path();
    let id = path_id(id, path)?;
    let mut view = valid_body(body, path)?;
    // The path wins over whatever id the body carries
    view.id = Some(id);

    tracing::info!("Updating task with id: {}", id);
    state
        .tasks
        .save(view)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_task_error(e, path))
}

/// DELETE /api/tasks/:id - Delete a task.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let path = uri.path();
    let id = path_id(id, path)?;

    tracing::info!("Deleting task with id: {}", id);
    state
        .tasks
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::from_task_error(e, path))?;
    Ok(StatusCode::NO_CONTENT)
}
