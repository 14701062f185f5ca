//! # todo_task
//!
//! A small to-do list backend exposing task CRUD over a JSON HTTP API.
//!
//! ## Layers
//!
//! ```text
//!   HTTP (axum)  ──►  TaskService  ──►  TaskStore
//!   api::tasks        task::service     store::{SqliteTaskStore, InMemoryTaskStore}
//! ```
//!
//! ## Modules
//! - `api`: routes, handlers and the error-to-status translation
//! - `task`: task record, API view, mapper and service rules
//! - `store`: the CRUD storage contract and its backends
//! - `config`: environment-driven server configuration

pub mod api;
pub mod config;
pub mod store;
pub mod task;

pub use config::Config;
