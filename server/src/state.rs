//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the auth guard via the
//! `State` extractor. It holds no per-request mutable data: the only member is
//! the identity resolver, which owns its own connection pool.

use std::sync::Arc;

use crate::services::session::IdentityResolver;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the resolver is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn IdentityResolver>,
}

impl AppState {
    #[must_use]
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
