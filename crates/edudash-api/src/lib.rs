//! # edudash-api
//!
//! HTTP API layer for the EduDash training library built on Axum.
//!
//! Provides the REST endpoints, bearer-token and admin guards, request
//! DTOs with validation, and the mapping from `AppError` to HTTP.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
