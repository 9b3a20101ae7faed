//! # edudash-auth
//!
//! Bearer token handling. Sessions are issued by the shared identity
//! provider; this crate verifies them and exposes the caller's identity.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
