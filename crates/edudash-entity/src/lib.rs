//! # edudash-entity
//!
//! Domain entity models for the EduDash training library. Every struct in
//! this crate represents a database table row or a domain value object.
//! Database entities derive `sqlx::FromRow` and serialize with camelCase
//! field names, matching the JSON contract of the HTTP API.

pub mod document;
pub mod folder;
pub mod ordering;
pub mod user;
