//! Authentication for Expenso
//!
//! Bearer-credential resolution and account lookup. Every expense operation
//! is gated on an identity resolved here before any record access happens.

mod resolver;
mod service;

pub use resolver::extract_bearer;
pub use service::{hash_api_key, AuthError, AuthService};
