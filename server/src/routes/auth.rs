//! Auth guard: bearer credential validation for protected routes.
//!
//! The guard runs as route middleware. It resolves the presented credential
//! to an [`Identity`] and inserts a typed [`RequestContext`] into the request
//! extensions; handlers read it back through the [`CurrentIdentity`]
//! extractor instead of reaching into the request themselves.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::services::session::Identity;
use crate::state::AppState;

/// Request-scoped context attached by [`require_identity`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identity: Identity,
}

/// Pull the bearer credential out of the `Authorization` header.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the header is absent, not valid
/// visible ASCII, not the `Bearer` scheme, or carries a blank token.
pub(crate) fn bearer_credential(headers: &HeaderMap) -> Result<&str, ApiError> {
    let raw = headers.get(AUTHORIZATION).ok_or(ApiError::Unauthorized)?;
    let value = raw.to_str().map_err(|_| ApiError::Unauthorized)?;
    wire::parse_bearer(value).ok_or(ApiError::Unauthorized)
}

/// Middleware gating every route it is layered on.
///
/// Missing, malformed, unknown and expired credentials are terminal for the
/// request. A resolver failure surfaces as a generic server error.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_credential(request.headers())?.to_owned();

    let identity = state
        .resolver
        .resolve(&token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    tracing::debug!(user_id = %identity.id, "request authenticated");
    request.extensions_mut().insert(RequestContext { identity });
    Ok(next.run(request).await)
}

// =============================================================================
// IDENTITY EXTRACTOR
// =============================================================================

/// Identity attached by the auth guard.
/// Use as a handler parameter on routes layered with [`require_identity`].
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .map(|ctx| Self(ctx.identity.clone()))
            .ok_or(ApiError::MissingIdentity)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
