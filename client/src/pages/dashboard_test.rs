use std::cell::RefCell;

use super::*;
use crate::state::session::Credential;

fn ann() -> Profile {
    Profile { name: "Ann".to_owned(), email: "ann@x.com".to_owned() }
}

fn failures() -> Vec<ApiError> {
    vec![
        ApiError::Unauthorized(401),
        ApiError::Unauthorized(403),
        ApiError::Network("connection refused".to_owned()),
        ApiError::Status(500),
        ApiError::Decode("missing field `email`".to_owned()),
        ApiError::Unavailable,
    ]
}

// =============================================================
// Mount fetch outcomes
// =============================================================

#[test]
fn loading_to_loaded_on_success() {
    let step = transition(&DashboardState::Loading, DashboardEvent::ProfileLoaded(ann()));
    assert_eq!(step.next, DashboardState::Loaded(ann()));
    assert!(!step.end_session);
    assert_eq!(step.navigate_to, None);
}

#[test]
fn every_failure_class_clears_session_and_redirects() {
    for err in failures() {
        let step = transition(&DashboardState::Loading, DashboardEvent::ProfileFailed(err.clone()));
        assert_eq!(step.next, DashboardState::Redirecting, "{err:?}");
        assert!(step.end_session, "{err:?}");
        assert_eq!(step.navigate_to, Some(LOGIN_ROUTE), "{err:?}");
    }
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_redirects_from_every_state() {
    for state in [DashboardState::Loading, DashboardState::Loaded(ann()), DashboardState::Redirecting] {
        let step = transition(&state, DashboardEvent::Logout);
        assert_eq!(step.next, DashboardState::Redirecting, "{state:?}");
        assert!(step.end_session, "{state:?}");
        assert_eq!(step.navigate_to, Some("/login"), "{state:?}");
    }
}

// =============================================================
// Late results in terminal states
// =============================================================

#[test]
fn late_success_after_redirect_is_ignored() {
    let step = transition(&DashboardState::Redirecting, DashboardEvent::ProfileLoaded(ann()));
    assert_eq!(step.next, DashboardState::Redirecting);
    assert!(!step.end_session);
    assert_eq!(step.navigate_to, None);
}

#[test]
fn late_failure_after_loaded_is_ignored() {
    let step = transition(&DashboardState::Loaded(ann()), DashboardEvent::ProfileFailed(ApiError::Unauthorized(401)));
    assert_eq!(step.next, DashboardState::Loaded(ann()));
    assert!(!step.end_session);
    assert_eq!(step.navigate_to, None);
}

// =============================================================
// Rendering helpers
// =============================================================

#[test]
fn profile_lines_match_rendered_text() {
    assert_eq!(name_line(&ann()), "Name: Ann");
    assert_eq!(email_line(&ann()), "Email: ann@x.com");
}

// =============================================================
// Step effects
// =============================================================

fn signed_in() -> Session {
    let session = Session::in_memory();
    session.begin(Credential::new("valid-token").unwrap()).unwrap();
    session
}

/// Run `event` from `from` through the transition and its effects,
/// returning the routes navigated to.
fn run(session: &Session, from: &DashboardState, event: DashboardEvent) -> Vec<String> {
    let visited = RefCell::new(Vec::new());
    let step = transition(from, event);
    apply_step(session, &step, |route| visited.borrow_mut().push(route.to_owned()));
    visited.into_inner()
}

#[test]
fn unauthorized_fetch_clears_credential_and_goes_to_login() {
    let session = signed_in();
    let visited = run(&session, &DashboardState::Loading, DashboardEvent::ProfileFailed(ApiError::Unauthorized(401)));
    assert!(!session.is_active());
    assert_eq!(visited, vec![LOGIN_ROUTE.to_owned()]);
}

#[test]
fn every_fetch_failure_clears_credential_and_goes_to_login() {
    for error in failures() {
        let session = signed_in();
        let visited = run(&session, &DashboardState::Loading, DashboardEvent::ProfileFailed(error.clone()));
        assert!(!session.is_active(), "{error:?}");
        assert_eq!(visited, vec!["/login".to_owned()], "{error:?}");
    }
}

#[test]
fn logout_clears_credential_and_goes_to_login() {
    for from in [DashboardState::Loading, DashboardState::Loaded(ann())] {
        let session = signed_in();
        let visited = run(&session, &from, DashboardEvent::Logout);
        assert!(!session.is_active());
        assert_eq!(visited, vec!["/login".to_owned()]);
    }
}

#[test]
fn successful_fetch_keeps_session_and_stays() {
    let session = signed_in();
    let visited = run(&session, &DashboardState::Loading, DashboardEvent::ProfileLoaded(ann()));
    assert!(session.is_active());
    assert!(visited.is_empty());
}

#[test]
fn late_failure_after_redirect_has_no_effects() {
    let session = signed_in();
    let visited = run(&session, &DashboardState::Redirecting, DashboardEvent::ProfileFailed(ApiError::Status(500)));
    assert!(session.is_active());
    assert!(visited.is_empty());
}
