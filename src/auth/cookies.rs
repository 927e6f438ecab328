//! Auth cookie construction
//!
//! Cookies get the `__Secure-` prefix and the `Secure` attribute when the
//! service is served over https.

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

const COOKIE_PREFIX: &str = "gatehouse";
const SESSION_COOKIE: &str = "session_token";
const OAUTH_STATE_COOKIE: &str = "oauth_state";

/// OAuth state cookies live for 10 minutes
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 600;

#[derive(Debug, Clone)]
pub struct CookieSettings {
    secure: bool,
}

impl CookieSettings {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn name(&self, suffix: &str) -> String {
        if self.secure {
            format!("__Secure-{}.{}", COOKIE_PREFIX, suffix)
        } else {
            format!("{}.{}", COOKIE_PREFIX, suffix)
        }
    }

    pub fn session_cookie_name(&self) -> String {
        self.name(SESSION_COOKIE)
    }

    pub fn oauth_state_cookie_name(&self) -> String {
        self.name(OAUTH_STATE_COOKIE)
    }

    /// Session cookie carrying a signed session token
    ///
    /// `max_age = None` produces a browser-session cookie.
    pub fn session_cookie(&self, signed_token: String, max_age: Option<i64>) -> Cookie<'static> {
        let mut builder = Cookie::build((self.session_cookie_name(), signed_token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);

        if let Some(seconds) = max_age {
            builder = builder.max_age(time::Duration::seconds(seconds));
        }

        builder.build()
    }

    pub fn oauth_state_cookie(&self, signed_state: String) -> Cookie<'static> {
        Cookie::build((self.oauth_state_cookie_name(), signed_state))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(OAUTH_STATE_MAX_AGE_SECS))
            .build()
    }

    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        self.removal(self.session_cookie_name())
    }

    pub fn clear_oauth_state_cookie(&self) -> Cookie<'static> {
        self.removal(self.oauth_state_cookie_name())
    }

    fn removal(&self, name: String) -> Cookie<'static> {
        let mut cookie = Cookie::build((name, String::new()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build();
        cookie.make_removal();
        cookie
    }

    /// Raw (still signed) session cookie value from request headers
    pub fn read_session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        self.read(headers, &self.session_cookie_name())
    }

    pub fn read_oauth_state_cookie(&self, headers: &HeaderMap) -> Option<String> {
        self.read(headers, &self.oauth_state_cookie_name())
    }

    fn read(&self, headers: &HeaderMap, name: &str) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        jar.get(name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }
}
