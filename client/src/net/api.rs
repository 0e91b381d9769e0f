//! REST API client for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): requests fail with [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! The client is pass-through: it never retries or caches. Transport errors,
//! auth rejections and other statuses are surfaced as distinct [`ApiError`]
//! variants and the caller decides what they mean.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use wire::Profile;

use crate::state::session::Session;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network failure: {0}")]
    Network(String),
    /// The server rejected the credential (401 or 403).
    #[error("unauthorized: {0}")]
    Unauthorized(u16),
    /// Any other non-success status.
    #[error("request failed: {0}")]
    Status(u16),
    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

/// Map an HTTP status to success or the matching [`ApiError`].
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn classify_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(ApiError::Unauthorized(status)),
        _ => Err(ApiError::Status(status)),
    }
}

/// `Authorization` header value for the session's credential, if any.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn authorization_header(session: &Session) -> Option<String> {
    session.credential().map(|c| wire::bearer_value(c.as_str()))
}

/// Join a base URL and an absolute API path.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// The single configured HTTP client used by pages.
///
/// Every request carries the session's current credential, read at send time
/// so a login or logout is picked up without rebuilding the client.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// `base_url` may be empty to target the page's own origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self { base_url: base_url.into(), session }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, non-success statuses,
    /// or undecodable bodies.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let mut request = gloo_net::http::Request::get(&self.url(path));
            if let Some(value) = authorization_header(&self.session) {
                request = request.header("Authorization", &value);
            }
            let resp = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            classify_status(resp.status())?;
            resp.json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(ApiError::Unavailable)
        }
    }

    /// Fetch the logged-in user's profile from `/api/user/me`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.get_json(wire::PROFILE_PATH).await
    }
}
