//! HTTP API.

pub mod error;
pub mod routes;
pub mod tasks;

pub use error::{ApiError, ErrorBody};
pub use routes::{app, serve, AppState};
