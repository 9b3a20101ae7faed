//! User identity types.
//!
//! Accounts are owned by the identity provider; only the role is needed here.

pub mod role;

pub use role::UserRole;
