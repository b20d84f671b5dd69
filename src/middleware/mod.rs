//! Middleware for the Expenso API
//!
//! This module provides middleware for request tracing, security headers,
//! and authentication.

pub mod auth;
mod security;
mod tracing;

pub use auth::AuthenticatedAccount;
pub use security::security_headers;
pub use tracing::request_tracing;
