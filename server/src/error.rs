//! HTTP error taxonomy for API routes.
//!
//! Every variant renders as a small JSON [`wire::ErrorBody`]. Internal causes
//! are logged here and never echoed to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use wire::ErrorBody;

use crate::services::session::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Credential missing, malformed, unknown, or expired.
    #[error("unauthorized")]
    Unauthorized,
    /// A protected handler ran without an identity attached by the guard.
    #[error("identity missing from request context")]
    MissingIdentity,
    /// The identity backend could not be queried.
    #[error("identity resolution failed: {0}")]
    Resolver(#[from] ResolveError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MissingIdentity | Self::Resolver(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Unauthorized => ErrorBody::unauthorized(),
            Self::MissingIdentity | Self::Resolver(_) => ErrorBody::internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unauthorized => tracing::debug!("request rejected: unauthorized"),
            Self::MissingIdentity => tracing::error!("protected route reached without identity; is the auth guard mounted?"),
            Self::Resolver(e) => tracing::error!(error = %e, "identity resolution failed"),
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
