//! Login page accepting an externally issued access token.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{Credential, Session};

pub const DASHBOARD_ROUTE: &str = "/";

const EMPTY_TOKEN_MESSAGE: &str = "Enter an access token.";
const STORE_FAILED_MESSAGE: &str = "Could not store the access token.";

pub(crate) fn validate_token_input(raw: &str) -> Result<Credential, &'static str> {
    Credential::new(raw).ok_or(EMPTY_TOKEN_MESSAGE)
}

/// Validate the form input and begin the session with it.
/// The error is the message shown under the form.
pub(crate) fn submit_token(session: &Session, raw: &str) -> Result<(), &'static str> {
    let credential = validate_token_input(raw)?;
    session.begin(credential).map_err(|_| STORE_FAILED_MESSAGE)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();
    let token = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match submit_token(&session, &token.get()) {
            Ok(()) => {
                token.set(String::new());
                navigate(DASHBOARD_ROUTE, NavigateOptions::default());
            }
            Err(message) => info.set(message.to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Access token"
                        prop:value=move || token.get()
                        on:input=move |ev| token.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Continue"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
