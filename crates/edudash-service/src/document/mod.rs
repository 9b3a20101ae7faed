//! Training document management.

pub mod service;

pub use service::{DocumentService, NewTrainingDocument};
