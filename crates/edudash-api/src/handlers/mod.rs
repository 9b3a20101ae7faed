//! Route handlers organized by domain.

pub mod admin;
pub mod folder;
pub mod health;
pub mod training;
