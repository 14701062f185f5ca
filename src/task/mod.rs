//! Task module - the to-do entity, its API view, and the service enforcing task rules.
//!
//! - `types`: stored record, external view and field validation
//! - `mapper`: pure record <-> view conversion
//! - `service`: duplicate-title and existence rules over a `TaskStore`

pub mod mapper;
pub mod service;
pub mod types;

pub use service::{TaskError, TaskService};
pub use types::{FieldError, TaskRecord, TaskView};
