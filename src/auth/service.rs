//! Identity lookup
//!
//! Maps a bearer token to an active account through its stored verifier.

use sha2::{Digest, Sha256};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Auth errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header missing or malformed")]
    MissingCredential,

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Database(e.to_string())
    }
}

/// Account row as stored in the accounts table.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    api_key_hash: String,
}

/// Identity store gateway.
///
/// Accounts are provisioned out-of-band; this service only reads them.
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Resolve the account identifier for a bearer token.
    ///
    /// The token is digested and the single active account holding that
    /// verifier is looked up. Unknown, inactive, and malformed credentials
    /// are indistinguishable to the caller.
    pub async fn resolve_account(&self, token: &str) -> Result<Uuid, AuthError> {
        let digest = hash_api_key(token);

        let account: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT id, api_key_hash
            FROM accounts
            WHERE api_key_hash = $1 AND is_active = TRUE
            "#,
        )
        .bind(&digest)
        .fetch_optional(&self.db_pool)
        .await?;

        let account = account.ok_or(AuthError::InvalidCredential)?;

        // Re-check the stored verifier against the computed digest without
        // short-circuiting on the first differing byte.
        if !constant_time_eq(account.api_key_hash.as_bytes(), digest.as_bytes()) {
            return Err(AuthError::InvalidCredential);
        }

        Ok(account.id)
    }
}

/// Derive the stored verifier for an API key.
///
/// Must match the digest used when the credential was issued: hex-encoded
/// SHA-256 of the raw token bytes.
pub fn hash_api_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Byte-wise equality that does not short-circuit on a mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
