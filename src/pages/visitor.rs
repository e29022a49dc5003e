//! Pages for visitors without a session. Logged-in users are sent home.

#[cfg(test)]
#[path = "visitor_test.rs"]
mod visitor_test;

use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! { <LoginForm title="Login"/> }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! { <h1>"Register"</h1> }
}

/// Admin accounts log in through the same endpoint; the role in the response
/// decides whether admin pages open afterwards.
#[component]
pub fn AdminLoginPage() -> impl IntoView {
    view! { <LoginForm title="Admin Login"/> }
}

/// Trim the username and require both fields.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Credential form shared by both login pages. On success the session is
/// stored and the user is sent to the configured home page.
#[component]
fn LoginForm(title: &'static str) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "hydrate")]
    let config = expect_context::<crate::config::GuardConfig>();

    let submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let (user, pass) = match validate_credentials(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let config = config.clone();
            busy.set(true);
            info.set("Logging in...".to_owned());
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&user, &pass).await {
                    Ok(session) => {
                        let stored = crate::state::session::persist_login(
                            &crate::util::storage::BrowserStorage,
                            &config,
                            &session.access_token,
                            session.role.as_deref(),
                        );
                        match stored {
                            Ok(()) => {
                                info.set(String::new());
                                navigate(&config.home_path, leptos_router::NavigateOptions::default());
                            }
                            Err(err) => {
                                log::error!("login succeeded but the session could not be stored: {err}");
                                info.set("Could not store the session in this browser.".to_owned());
                            }
                        }
                    }
                    Err(msg) => info.set(msg),
                }
                busy.set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user, pass);
        }
    });

    view! {
        <div class="login-page">
            <h1>{title}</h1>
            <form
                class="login-form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <label class="login-form__label">
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-form__label">
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Log in"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="login-form__info">{move || info.get()}</p>
            </Show>
        </div>
    }
}
