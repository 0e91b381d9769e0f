//! User profile routes.

use axum::response::Json;
use wire::Profile;

use super::auth::CurrentIdentity;

/// `GET /api/user/me` — return the authenticated caller's profile.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<Profile> {
    Json(Profile::from(&identity))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
