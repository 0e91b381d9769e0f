//! Shared HTTP wire shapes for the profile API.
//!
//! This crate owns the JSON representation used by `server`, `client` and
//! `cli`, plus the bearer-credential header format all three agree on.

use serde::{Deserialize, Serialize};

/// Path of the authenticated profile endpoint.
pub const PROFILE_PATH: &str = "/api/user/me";

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller's profile as sent over the wire.
///
/// The server emits exactly these fields. Clients tolerate extra fields so an
/// older client keeps working against a server that grows the shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

/// Body of every non-success API response.
///
/// Carries a short machine-readable code and nothing else, so rejected
/// requests never leak identity data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn unauthorized() -> Self {
        Self { error: "unauthorized".to_owned() }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self { error: "internal".to_owned() }
    }
}

/// Liveness message returned from `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Format a credential as an `Authorization` header value.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}

/// Extract the credential from an `Authorization` header value.
///
/// Returns `None` when the scheme is not `Bearer` or the token is blank.
/// The scheme match is case-insensitive; surrounding whitespace on the token
/// is ignored.
#[must_use]
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, rest) = header.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX.trim_end()) {
        return None;
    }
    let token = rest.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
