//! HTTP surface of the BiT Jobs employer API
//!
//! Exposed as a library so integration tests can build the application
//! against the in-memory store.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::{AppState, EmployerStore};
