//! # edudash-service
//!
//! Business logic for the training library. Each service holds the store
//! trait objects it needs, injected at construction time as `Arc`s.

pub mod context;
pub mod document;
pub mod folder;
pub mod reorder;

pub use context::RequestContext;
pub use document::{DocumentService, NewTrainingDocument};
pub use folder::{FolderService, TreeService};
pub use reorder::{Direction, ReorderService};
