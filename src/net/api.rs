//! REST API helpers for the booking server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since login only happens in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as display-ready strings so the login form can show
//! them as-is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

pub const LOGIN_ENDPOINT: &str = "/api/login";

/// Successful login response. The server may omit `role`; a missing role
/// means a regular customer.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LoginSession {
    pub access_token: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Message for a non-2xx login response. Prefers the server's `message`.
#[cfg(any(test, feature = "hydrate"))]
fn login_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if !err.message.is_empty() => err.message,
        _ if status == 401 => "Incorrect username or password.".to_owned(),
        _ => format!("login failed: {status}"),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_login_session(body: &str) -> Result<LoginSession, String> {
    let session: LoginSession = serde_json::from_str(body).map_err(|e| format!("bad login response: {e}"))?;
    if session.access_token.is_empty() {
        return Err("bad login response: empty access token".to_owned());
    }
    Ok(session)
}

/// Exchange credentials for a session token via `POST /api/login`.
///
/// # Errors
///
/// Returns a display-ready message if the request fails or is refused.
pub async fn login(username: &str, password: &str) -> Result<LoginSession, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({ "username": username, "password": password });
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let text = resp.text().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(login_error_message(resp.status(), &text));
        }
        parse_login_session(&text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err("not available on server".to_owned())
    }
}
