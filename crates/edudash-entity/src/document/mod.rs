//! Document domain entities.

pub mod kind;
pub mod model;

pub use kind::DocumentType;
pub use model::{
    CreateDocument, Document, MAX_REQUIREMENTS_CHARS, SKILL_LEVEL_RANGE, file_name_from_url,
};
