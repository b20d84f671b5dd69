//! Authentication middleware
//!
//! Extractor that resolves the caller's identity before any handler body
//! runs. Handlers never see a request whose account was not resolved.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{extract_bearer, AuthError, AuthService};
use crate::error::ApiError;

/// Identity resolved for the current request.
///
/// The account identifier is derived from the presented credential, never
/// from any caller-supplied field.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthErrorBody {
    error: AuthErrorDetails,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetails {
    code: String,
    message: String,
}

impl AuthErrorBody {
    fn new(code: &str, message: &str) -> Self {
        Self {
            error: AuthErrorDetails {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

impl IntoResponse for AuthErrorBody {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Extractor for authenticated accounts
///
/// Pulls the bearer credential from the Authorization header and resolves it
/// to an active account. Authentication failures abort the request with a
/// hard 401 before any store access happens on behalf of the caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(account: AuthenticatedAccount) -> impl IntoResponse {
///     format!("Hello, account {}", account.account_id)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the credential; no store access yet.
        let token = extract_bearer(&parts.headers).map_err(|_| {
            AuthErrorBody::new(
                "MISSING_TOKEN",
                "Authorization header with Bearer token required",
            )
            .into_response()
        })?;

        // Get the auth service from state
        let auth_service = Arc::<AuthService>::from_ref(state);

        let account_id = auth_service
            .resolve_account(&token)
            .await
            .map_err(|e| match e {
                AuthError::Database(msg) => ApiError::DatabaseError(msg).into_response(),
                _ => AuthErrorBody::new("INVALID_API_KEY", "API key unknown or inactive")
                    .into_response(),
            })?;

        Ok(AuthenticatedAccount { account_id })
    }
}
