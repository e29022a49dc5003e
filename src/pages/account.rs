//! Pages that need a stored session token.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::GuardConfig;
use crate::state::session::clear_session;
use crate::util::storage::BrowserStorage;

#[component]
pub fn ProtectedPage() -> impl IntoView {
    view! {
        <h1>"Protected"</h1>
        <LogoutButton/>
    }
}

#[component]
pub fn BookingsPage() -> impl IntoView {
    view! {
        <h1>"My bookings"</h1>
        <LogoutButton/>
    }
}

/// Drop the stored session and return to the login page.
#[component]
pub fn LogoutButton() -> impl IntoView {
    let config = expect_context::<GuardConfig>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        if let Err(err) = clear_session(&BrowserStorage, &config) {
            log::warn!("logout could not clear the stored session: {err}");
        }
        navigate(&config.login_path, NavigateOptions::default());
    };

    view! {
        <button class="btn" on:click=on_logout>
            "Log out"
        </button>
    }
}
