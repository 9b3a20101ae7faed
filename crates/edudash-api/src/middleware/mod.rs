//! Middleware and guards.

pub mod cors;
pub mod rbac;
