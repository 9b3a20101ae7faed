//! Sibling ordering and reparenting of folders and documents.

pub mod service;
pub mod step;

pub use service::ReorderService;
pub use step::{Direction, StepPlan};
