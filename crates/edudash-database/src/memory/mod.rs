//! In-process store backed by hash maps.

pub mod store;

pub use store::MemoryStore;
