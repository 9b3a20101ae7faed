//! # edudash-database
//!
//! Persistence for folders and documents. The [`store`] traits are the
//! seam the service layer depends on; [`repositories`] implements them on
//! PostgreSQL and [`memory`] keeps everything in process for tests and
//! single-node demos. [`provider`] picks one from configuration, opening
//! the pool and applying the schema for the PostgreSQL backend.

pub mod memory;
pub mod provider;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use provider::Stores;
pub use store::{DocumentStore, FolderStore};
