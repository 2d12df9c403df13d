//! Supabase GoTrue sign-in, refresh, and sign-out over REST.
//!
//! SYSTEM CONTEXT
//! ==============
//! Google OAuth is a full-page redirect to
//! `<supabase>/auth/v1/authorize`; GoTrue returns to our origin with the
//! tokens in the URL fragment. [`restore`] runs once at startup: it adopts
//! a fragment session if present, otherwise the cached one from
//! `localStorage`, refreshes it when expired, and publishes the result to
//! the [`SessionHub`].
//!
//! TRADE-OFFS
//! ==========
//! Sign-out always clears the local cache and notifies subscribers, even if
//! the logout request fails; a stale server-side refresh token is harmless
//! once the browser forgot it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use harita::session::{Session, SessionHub};
use serde::Deserialize;
use url::Url;

use crate::config::ClientConfig;

/// `localStorage` key of the cached session.
pub const SESSION_KEY: &str = "harita.auth.session";
pub const OAUTH_PROVIDER: &str = "google";

/// GoTrue authorize URL that sends the user back to `redirect_to`.
#[must_use]
pub fn authorize_url(supabase_url: &str, redirect_to: &str) -> String {
    let base = format!("{}/auth/v1/authorize", supabase_url.trim_end_matches('/'));
    match Url::parse_with_params(&base, &[("provider", OAUTH_PROVIDER), ("redirect_to", redirect_to)]) {
        Ok(url) => url.into(),
        Err(_) => base,
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(supabase_url: &str, path: &str) -> String {
    format!("{}/auth/v1/{path}", supabase_url.trim_end_matches('/'))
}

/// Parse the `#access_token=…&refresh_token=…&expires_in=…` fragment GoTrue
/// appends after an OAuth round trip. `now` is Unix seconds.
#[must_use]
pub fn parse_oauth_fragment(fragment: &str, now: i64) -> Option<Session> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut session = None::<Session>;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" if !value.is_empty() => session = Some(Session::new(value.into_owned())),
            "refresh_token" => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<i64>().ok(),
            "expires_at" => expires_at = value.parse::<i64>().ok(),
            _ => {}
        }
    }
    let mut session = session?;
    session.refresh_token = refresh_token;
    session.expires_at = expires_at.or_else(|| expires_in.map(|secs| now + secs));
    Some(session)
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}

/// Body of `POST /auth/v1/token?grant_type=refresh_token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<TokenUser>,
}

impl TokenResponse {
    #[must_use]
    pub fn into_session(self, now: i64) -> Session {
        let mut session = Session::new(self.access_token);
        session.refresh_token = self.refresh_token;
        session.expires_at = self.expires_at.or_else(|| self.expires_in.map(|secs| now + secs));
        session.user_email = self.user.and_then(|u| u.email);
        session
    }
}

#[cfg(feature = "hydrate")]
fn now_secs() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
}

/// Resolve the startup session and publish it.
pub fn restore(config: &ClientConfig, hub: &SessionHub) {
    #[cfg(feature = "hydrate")]
    {
        let config = config.clone();
        let hub = hub.clone();
        leptos::task::spawn_local(async move {
            let session = resolve_startup_session(&config).await;
            match &session {
                Some(s) => {
                    crate::util::storage::save_json(SESSION_KEY, s);
                    log::info!("session restored");
                }
                None => crate::util::storage::remove(SESSION_KEY),
            }
            hub.publish(session);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, hub);
    }
}

#[cfg(feature = "hydrate")]
async fn resolve_startup_session(config: &ClientConfig) -> Option<Session> {
    let now = now_secs();
    if let Some(session) = take_fragment_session(now) {
        return Some(session);
    }
    let cached: Session = crate::util::storage::load_json(SESSION_KEY)?;
    if !cached.is_expired(now) {
        return Some(cached);
    }
    let refresh_token = cached.refresh_token.as_deref()?;
    match refresh(config, refresh_token).await {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("session refresh failed: {e}");
            None
        }
    }
}

/// Adopt and strip an OAuth fragment from the current location.
#[cfg(feature = "hydrate")]
fn take_fragment_session(now: i64) -> Option<Session> {
    let window = web_sys::window()?;
    let hash = window.location().hash().ok()?;
    let session = parse_oauth_fragment(&hash, now)?;
    if let Ok(history) = window.history() {
        let path = window.location().pathname().unwrap_or_else(|_| "/".to_owned());
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
    Some(session)
}

/// Exchange a refresh token for a new session.
///
/// # Errors
///
/// Returns an error string if the request fails or GoTrue rejects the token.
pub async fn refresh(config: &ClientConfig, refresh_token: &str) -> Result<Session, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}?grant_type=refresh_token", endpoint(&config.supabase_url, "token"));
        let resp = gloo_net::http::Request::post(&url)
            .header("apikey", &config.supabase_anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("token refresh failed: {}", resp.status()));
        }
        let body: TokenResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_session(now_secs()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, refresh_token);
        Err("not available on server".to_owned())
    }
}

/// Leave the app for the Google consent screen.
pub fn sign_in_with_google(config: &ClientConfig) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let origin = window.location().origin().unwrap_or_default();
        let _ = window.location().set_href(&authorize_url(&config.supabase_url, &origin));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
    }
}

/// Revoke the session server-side, forget it locally, and notify subscribers.
pub async fn sign_out(config: &ClientConfig, hub: &SessionHub) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(token) = hub.current().access_token() {
            let result = gloo_net::http::Request::post(&endpoint(&config.supabase_url, "logout"))
                .header("apikey", &config.supabase_anon_key)
                .header("Authorization", &format!("Bearer {token}"))
                .send()
                .await;
            match result {
                Ok(resp) if !resp.ok() => log::warn!("logout returned {}", resp.status()),
                Err(e) => log::warn!("logout request failed: {e}"),
                Ok(_) => {}
            }
        }
        crate::util::storage::remove(SESSION_KEY);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
    }
    hub.publish(None);
}
