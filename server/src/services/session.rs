//! Credential-to-identity resolution.
//!
//! ARCHITECTURE
//! ============
//! Bearer tokens are minted by the login service and persisted as SHA-256
//! digests in the `sessions` table. This module only reads: the auth guard
//! hashes the presented token and joins it against `users`, rejecting rows
//! whose `expires_at` has passed.
//!
//! TRADE-OFFS
//! ==========
//! Resolution goes through the [`IdentityResolver`] trait so routes can be
//! exercised against an in-process fixture without a live database.

use std::fmt::Write;

use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Hash a bearer token into the hex digest stored in `sessions.token_hash`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// The authenticated caller, as resolved from a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Unique user identifier. Server-internal; not part of the profile.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

impl From<&Identity> for wire::Profile {
    fn from(identity: &Identity) -> Self {
        Self { name: identity.name.clone(), email: identity.email.clone() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Resolves bearer credentials to identities. Enables mocking in tests.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Look up the identity behind `token`.
    ///
    /// Returns `Ok(None)` for unknown or expired credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the backing store cannot be queried.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, ResolveError>;
}

/// Postgres-backed resolver reading the `sessions` and `users` tables.
#[derive(Clone)]
pub struct PgSessionResolver {
    pool: PgPool,
}

impl PgSessionResolver {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityResolver for PgSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, ResolveError> {
        let row = sqlx::query(
            r"SELECT u.id, u.name, u.email
              FROM sessions s
              JOIN users u ON u.id = s.user_id
              WHERE s.token_hash = $1 AND s.expires_at > now()",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Identity { id: r.get("id"), name: r.get("name"), email: r.get("email") }))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
