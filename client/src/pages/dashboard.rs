//! Dashboard page showing the logged-in user's profile.
//!
//! DESIGN
//! ======
//! The page is a three-state machine driven by [`transition`]:
//!
//! | from        | event           | to          | effects                 |
//! |-------------|-----------------|-------------|-------------------------|
//! | `Loading`   | `ProfileLoaded` | `Loaded`    | none                    |
//! | `Loading`   | `ProfileFailed` | `Redirecting` | end session, go to login |
//! | any         | `Logout`        | `Redirecting` | end session, go to login |
//! | terminal    | fetch result    | unchanged   | none                    |
//!
//! Every failure class is handled the same way; the page never shows a
//! partial or error state. The mount fetch is cancelled on unmount, so a
//! response arriving after the page is gone changes nothing.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wire::Profile;

use crate::net::api::{ApiClient, ApiError};
use crate::state::session::Session;

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardState {
    Loading,
    Loaded(Profile),
    Redirecting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    ProfileLoaded(Profile),
    ProfileFailed(ApiError),
    Logout,
}

/// Next state plus the side effects the page must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: DashboardState,
    pub end_session: bool,
    pub navigate_to: Option<&'static str>,
}

impl Transition {
    fn stay(state: &DashboardState) -> Self {
        Self { next: state.clone(), end_session: false, navigate_to: None }
    }

    fn redirect() -> Self {
        Self { next: DashboardState::Redirecting, end_session: true, navigate_to: Some(LOGIN_ROUTE) }
    }
}

#[must_use]
pub fn transition(current: &DashboardState, event: DashboardEvent) -> Transition {
    match (current, event) {
        (_, DashboardEvent::Logout) | (DashboardState::Loading, DashboardEvent::ProfileFailed(_)) => {
            Transition::redirect()
        }
        (DashboardState::Loading, DashboardEvent::ProfileLoaded(profile)) => Transition {
            next: DashboardState::Loaded(profile),
            end_session: false,
            navigate_to: None,
        },
        (state, _) => Transition::stay(state),
    }
}

/// Perform a step's side effects: end the session before navigating away.
pub fn apply_step(session: &Session, step: &Transition, navigate: impl Fn(&str)) {
    if step.end_session {
        session.end();
    }
    if let Some(route) = step.navigate_to {
        navigate(route);
    }
}

#[must_use]
pub fn name_line(profile: &Profile) -> String {
    format!("Name: {}", profile.name)
}

#[must_use]
pub fn email_line(profile: &Profile) -> String {
    format!("Email: {}", profile.email)
}

/// Dashboard page — fetches the profile once on mount and renders it.
/// Redirects to `/login` on any failure or on logout.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();
    let state = RwSignal::new(DashboardState::Loading);

    let apply = {
        let session = api.session().clone();
        move |event: DashboardEvent| {
            let step = transition(&state.get_untracked(), event);
            state.set(step.next.clone());
            apply_step(&session, &step, |route| navigate(route, NavigateOptions::default()));
        }
    };

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let cancelled = Arc::new(AtomicBool::new(false));
        on_cleanup({
            let cancelled = Arc::clone(&cancelled);
            move || cancelled.store(true, Ordering::Relaxed)
        });

        let api = api.clone();
        let apply = apply.clone();
        leptos::task::spawn_local(async move {
            let event = match api.fetch_profile().await {
                Ok(profile) => DashboardEvent::ProfileLoaded(profile),
                Err(e) => {
                    log::warn!("profile load failed: {e}");
                    DashboardEvent::ProfileFailed(e)
                }
            };
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            apply(event);
        });
    }

    let on_logout = move |_| apply(DashboardEvent::Logout);

    view! {
        <div class="auth-container">
            {move || match state.get() {
                DashboardState::Loaded(profile) => {
                    view! {
                        <h2>"Dashboard"</h2>
                        <p class="auth-container__field">{name_line(&profile)}</p>
                        <p class="auth-container__field">{email_line(&profile)}</p>
                    }
                        .into_any()
                }
                DashboardState::Loading | DashboardState::Redirecting => {
                    view! { <p>"Loading..."</p> }.into_any()
                }
            }}
            <button class="btn" on:click=on_logout>
                "Logout"
            </button>
        </div>
    }
}
