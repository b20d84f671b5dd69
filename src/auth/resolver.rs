//! Credential resolution
//!
//! Extracts the bearer credential from inbound request headers. Extraction is
//! pure and never logs the raw token.

use axum::http::{header, HeaderMap};

use super::service::AuthError;

/// Scheme prefix required on the `Authorization` header value.
const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the request headers.
///
/// The standard `Authorization: Bearer <token>` header is the system-of-record
/// credential carrier. A missing header, a different scheme, and an empty
/// token are all reported as the same failure so callers cannot tell the
/// cases apart. The returned token is the full trimmed value, never a
/// truncated one.
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    Ok(token.to_string())
}
