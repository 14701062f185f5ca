//! Translation of domain failures into HTTP error responses.
//!
//! Every error leaves the API with the same body shape:
//! `{ "status": "NOT_FOUND", "message": "...", "path": "/api/tasks/9" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::task::{FieldError, TaskError};

/// Uniform JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Request path without query.
    pub path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    /// 400 listing each failing field as `field: reason`, comma-joined.
    pub fn validation(errors: &[FieldError], path: impl Into<String>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::bad_request(message, path)
    }

    pub fn internal(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, path)
    }

    pub fn from_task_error(error: TaskError, path: impl Into<String>) -> Self {
        let path = path.into();
        match error {
            TaskError::NotFound(_) => {
                tracing::warn!("{} ({})", error, path);
                Self::new(StatusCode::NOT_FOUND, error.to_string(), path)
            }
            TaskError::AlreadyExists(_) => Self::new(StatusCode::CONFLICT, error.to_string(), path),
            TaskError::Store(_) => {
                tracing::error!("Internal failure on {}: {}", path, error);
                Self::internal(error.to_string(), path)
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: status_name(self.status),
            message: self.message.clone(),
            path: self.path.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

/// Upper-snake-case reason phrase, e.g. `404` -> `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect(),
        None => status.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_names() {
        assert_eq!(status_name(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::CONFLICT), "CONFLICT");
        assert_eq!(
            status_name(StatusCode::INTERNAL_SERVER_ERROR),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn test_task_errors_map_to_statuses() {
        let not_found = ApiError::from_task_error(TaskError::NotFound(9), "/api/tasks/9");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(
            not_found.body(),
            ErrorBody {
                status: "NOT_FOUND".to_string(),
                message: "Task not found with id: 9".to_string(),
                path: "/api/tasks/9".to_string(),
            }
        );

        let conflict = ApiError::from_task_error(
            TaskError::AlreadyExists("Buy milk".to_string()),
            "/api/tasks",
        );
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.message, "Task already exists with title: Buy milk");

        let internal = ApiError::from_task_error(
            TaskError::Store(StoreError::Database("disk I/O error".to_string())),
            "/api/tasks",
        );
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Database error: disk I/O error");
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let err = ApiError::validation(
            &[
                FieldError::new("title", "Title is required"),
                FieldError::new("description", "Description must be at most 255 characters"),
            ],
            "/api/tasks",
        );
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "title: Title is required, description: Description must be at most 255 characters"
        );
    }
}
