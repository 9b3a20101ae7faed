//! Sibling ordering shared by folders and documents.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entity positioned among its siblings by an integer order key.
pub trait Ordered {
    /// Entity identifier.
    fn id(&self) -> Uuid;
    /// Sibling order key.
    fn ord(&self) -> i32;
    /// Creation time, the first tie-breaker.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Canonical sibling comparison: `ord`, then creation time, then id.
pub fn sibling_cmp<T: Ordered>(a: &T, b: &T) -> Ordering {
    a.ord()
        .cmp(&b.ord())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Sort a sibling list into canonical order.
pub fn sort_siblings<T: Ordered>(items: &mut [T]) {
    items.sort_by(sibling_cmp);
}

/// A single order-key assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdUpdate {
    /// Entity to update.
    pub id: Uuid,
    /// New order key.
    pub ord: i32,
}

impl OrdUpdate {
    /// Create an order-key assignment.
    pub fn new(id: Uuid, ord: i32) -> Self {
        Self { id, ord }
    }
}
