//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and stitches it with Leptos SSR rendering
//! under a single Axum router. Protected routes are grouped so the auth guard
//! is layered on them and nothing else.

pub mod auth;
pub mod users;

use std::path::PathBuf;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware;
use axum::response::Json;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use wire::StatusMessage;

use crate::state::AppState;

/// Build the CORS layer: a single exact origin, or any origin when `None`.
///
/// Request headers are listed explicitly: a `*` allow-headers wildcard never
/// covers `Authorization`, so bearer requests would fail preflight.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers([AUTHORIZATION, CONTENT_TYPE]);
    match origin {
        Some(origin) => Ok(layer.allow_origin(HeaderValue::from_str(origin)?)),
        None => Ok(layer.allow_origin(Any)),
    }
}

/// Routes that require an authenticated identity.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(wire::PROFILE_PATH, get(users::me))
        .route_layer(middleware::from_fn_with_state(state, auth::require_identity))
}

/// JSON API routes shared by the SSR app and the API-only server.
pub fn api_routes(state: AppState, cors: CorsLayer) -> Router {
    with_api(Router::new(), state, cors)
}

/// API routes plus the `GET /` status message, for running without the
/// frontend bundle.
pub fn api_only(state: AppState, cors: CorsLayer) -> Router {
    with_api(Router::new().route("/", get(root)), state, cors)
}

fn with_api(base: Router<AppState>, state: AppState, cors: CorsLayer) -> Router {
    base.route(wire::HEALTH_PATH, get(healthz))
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Leptos SSR frontend: API routes + Leptos SSR pages + static `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState, cors: CorsLayer) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state, cors)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn root() -> Json<StatusMessage> {
    Json(StatusMessage { message: "API is running".to_owned() })
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
