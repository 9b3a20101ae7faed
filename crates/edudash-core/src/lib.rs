//! # edudash-core
//!
//! Core crate for the EduDash training library. Contains the configuration
//! schema and the unified error system.
//!
//! This crate has **no** internal dependencies on other EduDash crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
