//! Admin-only handlers.

pub mod documents;
pub mod folders;
pub mod training;
