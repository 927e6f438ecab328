//! Authentication service
//!
//! Issues, validates and revokes sessions. Handlers never touch the
//! store directly for auth concerns; they go through `AuthService`.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::Cookie;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cookies::{CookieSettings, OAUTH_STATE_MAX_AGE_SECS};
use super::google::{self, GoogleProvider};
use super::origin::is_trusted_origin;
use super::password::{hash_password, verify_dummy_password, verify_password};
use super::signing::{
    decode_signed_payload, encode_signed_payload, generate_token, sign_value, verify_signed_value,
};
use crate::config::AuthConfig;
use crate::data::{
    Account, AuthStore, CREDENTIAL_PROVIDER_ID, EntityId, Session, SessionWithUser, User,
};
use crate::error::AppError;
use crate::metrics;

/// Client details recorded on new sessions
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        Self {
            ip_address,
            user_agent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, rename = "callbackURL")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_remember_me")]
    pub remember_me: bool,
    #[serde(default, rename = "callbackURL")]
    pub callback_url: Option<String>,
}

fn default_remember_me() -> bool {
    true
}

/// Result of a sign-up or sign-in
///
/// `session` and `cookie` are absent when sign-up is waiting on email
/// verification.
#[derive(Debug)]
pub struct AuthOutcome {
    pub user: User,
    pub session: Option<Session>,
    pub cookie: Option<Cookie<'static>>,
}

/// Where to send the browser to start a social sign-in
#[derive(Debug)]
pub struct SocialRedirect {
    pub url: String,
    pub state_cookie: Cookie<'static>,
}

/// Completed social sign-in
#[derive(Debug)]
pub struct SocialCallback {
    pub user: User,
    pub session_cookie: Cookie<'static>,
    pub redirect_to: String,
}

/// Contents of the signed OAuth state cookie
#[derive(Debug, Serialize, Deserialize)]
struct OAuthState {
    state: String,
    callback_url: String,
    expires_at: DateTime<Utc>,
}

pub struct AuthService {
    config: AuthConfig,
    store: Arc<dyn AuthStore>,
    google: GoogleProvider,
    cookies: CookieSettings,
}

impl AuthService {
    pub fn new(config: AuthConfig, store: Arc<dyn AuthStore>, http_client: reqwest::Client) -> Self {
        let google = GoogleProvider::new(
            config.social_providers.google.clone(),
            config.google_redirect_uri(),
            http_client,
        );
        let cookies = CookieSettings::new(config.uses_secure_cookies());

        Self {
            config,
            store,
            google,
            cookies,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn cookies(&self) -> &CookieSettings {
        &self.cookies
    }

    pub fn store(&self) -> &Arc<dyn AuthStore> {
        &self.store
    }

    pub fn is_trusted_origin(&self, url: &str) -> bool {
        is_trusted_origin(url, &self.config.trusted_origins)
    }

    // =========================================================================
    // Session lookup
    // =========================================================================

    /// Resolve the session behind the request's cookie
    ///
    /// A missing, forged, unknown or expired session is `Ok(None)`.
    /// Only store failures are errors.
    pub async fn get_session(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<SessionWithUser>, AppError> {
        let Some(token) = self.session_token(headers) else {
            metrics::observe_session_lookup("missing");
            return Ok(None);
        };

        let found = match self.store.find_session(&token).await {
            Ok(found) => found,
            Err(error) => {
                metrics::observe_session_lookup("error");
                return Err(error);
            }
        };

        let Some(mut found) = found else {
            metrics::observe_session_lookup("missing");
            return Ok(None);
        };

        if found.session.is_expired() {
            self.store.delete_session(&token).await?;
            metrics::observe_session_lookup("expired");
            return Ok(None);
        }

        let now = Utc::now();
        let expires_in = Duration::seconds(self.config.session.expires_in);
        let update_age = Duration::seconds(self.config.session.update_age);
        if found.session.expires_at - expires_in + update_age <= now {
            let expires_at = now + expires_in;
            self.store.update_session_expiry(&token, expires_at).await?;
            found.session.expires_at = expires_at;
            found.session.updated_at = now;
            tracing::debug!(session_id = %found.session.id, "Session expiry extended");
        }

        metrics::observe_session_lookup("found");
        Ok(Some(found))
    }

    /// Unsigned session token from the request's cookie, if the signature holds
    fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        let signed = self.cookies.read_session_cookie(headers)?;
        verify_signed_value(&signed, &self.config.secret).ok()
    }

    pub async fn list_sessions(&self, user_id: &str) -> Result<Vec<Session>, AppError> {
        self.store.list_sessions_for_user(user_id).await
    }

    /// Create a session for `user` and the cookie that carries it
    pub async fn create_session(
        &self,
        user: &User,
        ctx: &RequestContext,
        remember_me: bool,
    ) -> Result<(Session, Cookie<'static>), AppError> {
        let now = Utc::now();
        let session = Session {
            id: EntityId::new().0,
            token: generate_token(),
            user_id: user.id.clone(),
            expires_at: now + Duration::seconds(self.config.session.expires_in),
            created_at: now,
            updated_at: now,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        };
        self.store.create_session(&session).await?;

        let signed = sign_value(&session.token, &self.config.secret)?;
        let max_age = remember_me.then_some(self.config.session.expires_in);
        let cookie = self.cookies.session_cookie(signed, max_age);

        Ok((session, cookie))
    }

    // =========================================================================
    // Email + password
    // =========================================================================

    fn ensure_email_and_password_enabled(&self) -> Result<(), AppError> {
        if self.config.email_and_password.enabled {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Email and password authentication is not enabled".to_string(),
            ))
        }
    }

    pub async fn sign_up_email(
        &self,
        request: SignUpRequest,
        ctx: &RequestContext,
    ) -> Result<AuthOutcome, AppError> {
        self.ensure_email_and_password_enabled()?;

        let email = normalize_email(&request.email);
        if !is_plausible_email(&email) {
            return Err(AppError::Validation("Invalid email".to_string()));
        }

        let policy = &self.config.email_and_password;
        let length = request.password.chars().count();
        if length < policy.min_password_length {
            return Err(AppError::Validation("Password too short".to_string()));
        }
        if length > policy.max_password_length {
            return Err(AppError::Validation("Password too long".to_string()));
        }

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::unprocessable(
                "USER_ALREADY_EXISTS",
                "User already exists",
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();
        let user = User {
            id: EntityId::new().0,
            name: request.name.trim().to_string(),
            email,
            email_verified: false,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let account = Account {
            id: EntityId::new().0,
            user_id: user.id.clone(),
            provider_id: CREDENTIAL_PROVIDER_ID.to_string(),
            account_id: user.id.clone(),
            password: Some(password_hash),
            access_token: None,
            refresh_token: None,
            id_token: None,
            access_token_expires_at: None,
            scope: None,
            created_at: now,
            updated_at: now,
        };
        self.store.create_user_with_account(&user, &account).await?;

        metrics::SIGN_UPS_TOTAL
            .with_label_values(&[CREDENTIAL_PROVIDER_ID])
            .inc();
        tracing::info!(user_id = %user.id, "User signed up with email");

        if policy.require_email_verification {
            return Ok(AuthOutcome {
                user,
                session: None,
                cookie: None,
            });
        }

        let (session, cookie) = self.create_session(&user, ctx, true).await?;
        Ok(AuthOutcome {
            user,
            session: Some(session),
            cookie: Some(cookie),
        })
    }

    pub async fn sign_in_email(
        &self,
        request: SignInRequest,
        ctx: &RequestContext,
    ) -> Result<AuthOutcome, AppError> {
        self.ensure_email_and_password_enabled()?;

        let result = self.verify_credentials(&request).await;
        let user = match result {
            Ok(user) => user,
            Err(error) => {
                metrics::observe_sign_in(CREDENTIAL_PROVIDER_ID, "failure");
                return Err(error);
            }
        };

        let (session, cookie) = self
            .create_session(&user, ctx, request.remember_me)
            .await?;

        metrics::observe_sign_in(CREDENTIAL_PROVIDER_ID, "success");
        tracing::info!(user_id = %user.id, "User signed in with email");

        Ok(AuthOutcome {
            user,
            session: Some(session),
            cookie: Some(cookie),
        })
    }

    async fn verify_credentials(&self, request: &SignInRequest) -> Result<User, AppError> {
        let invalid =
            || AppError::unauthorized_with("INVALID_EMAIL_OR_PASSWORD", "Invalid email or password");

        let email = normalize_email(&request.email);
        let Some(user) = self.store.find_user_by_email(&email).await? else {
            verify_dummy_password(&request.password);
            return Err(invalid());
        };

        let Some(hash) = self
            .store
            .find_credential_account(&user.id)
            .await?
            .and_then(|account| account.password)
        else {
            verify_dummy_password(&request.password);
            return Err(invalid());
        };

        if !verify_password(&request.password, &hash)? {
            return Err(invalid());
        }

        if self.config.email_and_password.require_email_verification && !user.email_verified {
            return Err(AppError::forbidden(
                "EMAIL_NOT_VERIFIED",
                "Email not verified",
            ));
        }

        Ok(user)
    }

    /// Revoke the session behind the request's cookie
    ///
    /// Succeeds whether or not a valid session was present.
    pub async fn sign_out(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if let Some(token) = self.session_token(headers) {
            self.store.delete_session(&token).await?;
            tracing::info!("Session signed out");
        }
        Ok(())
    }

    // =========================================================================
    // Social sign-in
    // =========================================================================

    fn ensure_provider(&self, provider: &str) -> Result<(), AppError> {
        if provider == google::PROVIDER_ID {
            Ok(())
        } else {
            Err(AppError::not_found(
                "PROVIDER_NOT_FOUND",
                format!("Provider not found: {}", provider),
            ))
        }
    }

    /// Begin the authorization code flow
    pub fn start_social_sign_in(
        &self,
        provider: &str,
        callback_url: Option<&str>,
    ) -> Result<SocialRedirect, AppError> {
        self.ensure_provider(provider)?;

        let callback_url = callback_url.unwrap_or("/");
        if !self.is_trusted_origin(callback_url) {
            return Err(invalid_callback_url());
        }

        let state = OAuthState {
            state: generate_token(),
            callback_url: callback_url.to_string(),
            expires_at: Utc::now() + Duration::seconds(OAUTH_STATE_MAX_AGE_SECS),
        };
        let signed_state = encode_signed_payload(&state, &self.config.secret)?;

        Ok(SocialRedirect {
            url: self.google.authorization_url(&state.state),
            state_cookie: self.cookies.oauth_state_cookie(signed_state),
        })
    }

    /// Finish the authorization code flow and sign the user in
    pub async fn finish_social_sign_in(
        &self,
        provider: &str,
        code: &str,
        state: &str,
        headers: &HeaderMap,
        ctx: &RequestContext,
    ) -> Result<SocialCallback, AppError> {
        self.ensure_provider(provider)?;

        let stored = self.verify_oauth_state(state, headers)?;
        if !self.is_trusted_origin(&stored.callback_url) {
            return Err(invalid_callback_url());
        }

        let profile = match self.google.exchange_code(code).await {
            Ok(profile) => profile,
            Err(error) => {
                tracing::warn!(%error, provider, "OAuth code exchange failed");
                metrics::observe_sign_in(provider, "failure");
                return Err(error);
            }
        };

        let user = self.resolve_social_user(profile).await?;
        let (_session, session_cookie) = self.create_session(&user, ctx, true).await?;

        metrics::observe_sign_in(provider, "success");
        tracing::info!(user_id = %user.id, provider, "User signed in with social provider");

        Ok(SocialCallback {
            user,
            session_cookie,
            redirect_to: stored.callback_url,
        })
    }

    fn verify_oauth_state(&self, state: &str, headers: &HeaderMap) -> Result<OAuthState, AppError> {
        let invalid = || AppError::unauthorized_with("INVALID_STATE", "Invalid OAuth state");

        let signed = self
            .cookies
            .read_oauth_state_cookie(headers)
            .ok_or_else(invalid)?;
        let stored: OAuthState =
            decode_signed_payload(&signed, &self.config.secret).map_err(|_| invalid())?;

        if stored.state != state || stored.expires_at <= Utc::now() {
            return Err(invalid());
        }

        Ok(stored)
    }

    async fn resolve_social_user(&self, profile: google::GoogleProfile) -> Result<User, AppError> {
        if let Some(account) = self
            .store
            .find_account(google::PROVIDER_ID, &profile.subject)
            .await?
        {
            return self
                .store
                .find_user_by_id(&account.user_id)
                .await?
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("account without user")));
        }

        let email = normalize_email(&profile.email);
        let now = Utc::now();
        let (user, is_new_user) = match self.store.find_user_by_email(&email).await? {
            Some(_) if !profile.email_verified => {
                return Err(AppError::unauthorized_with(
                    "ACCOUNT_NOT_LINKED",
                    "Account exists but the provider email is not verified",
                ));
            }
            Some(existing) => (existing, false),
            None => {
                let user = User {
                    id: EntityId::new().0,
                    name: profile.name.clone().unwrap_or_else(|| email.clone()),
                    email,
                    email_verified: profile.email_verified,
                    image: profile.picture.clone(),
                    created_at: now,
                    updated_at: now,
                };
                (user, true)
            }
        };

        let account = Account {
            id: EntityId::new().0,
            user_id: user.id.clone(),
            provider_id: google::PROVIDER_ID.to_string(),
            account_id: profile.subject,
            password: None,
            access_token: Some(profile.access_token),
            refresh_token: profile.refresh_token,
            id_token: profile.id_token,
            access_token_expires_at: profile.access_token_expires_at,
            scope: profile.scope,
            created_at: now,
            updated_at: now,
        };

        if is_new_user {
            self.store.create_user_with_account(&user, &account).await?;
            metrics::SIGN_UPS_TOTAL
                .with_label_values(&[google::PROVIDER_ID])
                .inc();
        } else {
            tracing::info!(user_id = %user.id, "Linking Google account to existing user");
            self.store.create_account(&account).await?;
        }

        Ok(user)
    }
}

pub(crate) fn invalid_callback_url() -> AppError {
    AppError::forbidden("INVALID_CALLBACK_URL", "Invalid callback URL")
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::MemoryStore;
    use axum::http::HeaderValue;

    fn service_with(store: Arc<MemoryStore>, require_verification: bool) -> AuthService {
        let env: config::Map<String, String> = [
            ("BETTER_AUTH_SECRET", "test-secret-key-32-bytes-long!!!"),
            ("BETTER_AUTH_URL", "http://localhost:3000"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let mut config = AppConfig::load_from_env(&env).expect("config loads");
        config.auth.email_and_password.require_email_verification = require_verification;

        AuthService::new(config.auth, store, reqwest::Client::new())
    }

    fn service() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (service_with(store.clone(), false), store)
    }

    fn sign_up(email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            callback_url: None,
        }
    }

    fn headers_with_cookie(cookie: &Cookie<'_>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", cookie.name(), cookie.value())).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn get_session_without_cookie_is_none() {
        let (service, _) = service();
        assert!(service.get_session(&HeaderMap::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_up_creates_a_usable_session() {
        let (service, _) = service();
        let outcome = service
            .sign_up_email(sign_up("Ana@Example.com"), &RequestContext::default())
            .await
            .unwrap();

        assert_eq!(outcome.user.email, "ana@example.com");
        let cookie = outcome.cookie.expect("session cookie");

        let found = service
            .get_session(&headers_with_cookie(&cookie))
            .await
            .unwrap()
            .expect("session");
        assert_eq!(found.user.name, "Ana");
    }

    #[tokio::test]
    async fn forged_cookie_is_ignored() {
        let (service, _) = service();
        let outcome = service
            .sign_up_email(sign_up("ana@example.com"), &RequestContext::default())
            .await
            .unwrap();
        let token = outcome.session.unwrap().token;

        let forged = sign_value(&token, "some-other-secret").unwrap();
        let cookie = service.cookies().session_cookie(forged, None);

        assert!(
            service
                .get_session(&headers_with_cookie(&cookie))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let (service, _) = service();
        let ctx = RequestContext::default();
        service
            .sign_up_email(sign_up("ana@example.com"), &ctx)
            .await
            .unwrap();

        let error = service
            .sign_up_email(sign_up("ANA@example.com"), &ctx)
            .await
            .expect_err("duplicate email must fail");
        assert!(matches!(
            error,
            AppError::Unprocessable {
                code: "USER_ALREADY_EXISTS",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let (service, _) = service();
        let mut request = sign_up("ana@example.com");
        request.password = "short".to_string();

        let error = service
            .sign_up_email(request, &RequestContext::default())
            .await
            .expect_err("short password must fail");
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn sign_in_checks_password() {
        let (service, _) = service();
        let ctx = RequestContext::default();
        service
            .sign_up_email(sign_up("ana@example.com"), &ctx)
            .await
            .unwrap();

        let wrong = SignInRequest {
            email: "ana@example.com".to_string(),
            password: "wrong password!".to_string(),
            remember_me: true,
            callback_url: None,
        };
        let error = service
            .sign_in_email(wrong, &ctx)
            .await
            .expect_err("wrong password must fail");
        assert!(matches!(
            error,
            AppError::Unauthorized {
                code: "INVALID_EMAIL_OR_PASSWORD",
                ..
            }
        ));

        let right = SignInRequest {
            email: "ana@example.com".to_string(),
            password: "correct horse battery".to_string(),
            remember_me: false,
            callback_url: None,
        };
        let outcome = service.sign_in_email(right, &ctx).await.unwrap();
        assert_eq!(outcome.cookie.expect("cookie").max_age(), None);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_alike() {
        let (service, _) = service();
        let ctx = RequestContext::default();

        let error = service
            .sign_in_email(
                SignInRequest {
                    email: "nobody@example.com".to_string(),
                    password: "correct horse battery".to_string(),
                    remember_me: true,
                    callback_url: None,
                },
                &ctx,
            )
            .await
            .expect_err("unknown email must fail");
        assert!(matches!(
            error,
            AppError::Unauthorized {
                code: "INVALID_EMAIL_OR_PASSWORD",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn verification_requirement_blocks_sign_in() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with(store, true);
        let ctx = RequestContext::default();

        let outcome = service
            .sign_up_email(sign_up("ana@example.com"), &ctx)
            .await
            .unwrap();
        assert!(outcome.session.is_none());

        let error = service
            .sign_in_email(
                SignInRequest {
                    email: "ana@example.com".to_string(),
                    password: "correct horse battery".to_string(),
                    remember_me: true,
                    callback_url: None,
                },
                &ctx,
            )
            .await
            .expect_err("unverified email must fail");
        assert!(matches!(
            error,
            AppError::Forbidden {
                code: "EMAIL_NOT_VERIFIED",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn sign_out_revokes_session() {
        let (service, store) = service();
        let outcome = service
            .sign_up_email(sign_up("ana@example.com"), &RequestContext::default())
            .await
            .unwrap();
        let headers = headers_with_cookie(&outcome.cookie.unwrap());

        service.sign_out(&headers).await.unwrap();

        assert!(service.get_session(&headers).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
        assert!(service.sign_out(&HeaderMap::new()).await.is_ok());
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_lookup() {
        let (service, store) = service();
        let outcome = service
            .sign_up_email(sign_up("ana@example.com"), &RequestContext::default())
            .await
            .unwrap();
        let token = outcome.session.unwrap().token;
        store
            .update_session_expiry(&token, Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        let headers = headers_with_cookie(&outcome.cookie.unwrap());
        assert!(service.get_session(&headers).await.unwrap().is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn stale_session_gets_extended() {
        let (service, store) = service();
        let outcome = service
            .sign_up_email(sign_up("ana@example.com"), &RequestContext::default())
            .await
            .unwrap();
        let token = outcome.session.unwrap().token;
        let nearly_expired = Utc::now() + Duration::hours(1);
        store
            .update_session_expiry(&token, nearly_expired)
            .await
            .unwrap();

        let headers = headers_with_cookie(&outcome.cookie.unwrap());
        let found = service.get_session(&headers).await.unwrap().unwrap();
        assert!(found.session.expires_at > Utc::now() + Duration::days(6));
    }

    #[tokio::test]
    async fn social_sign_in_rejects_unknown_provider_and_callback() {
        let (service, _) = service();

        assert!(matches!(
            service.start_social_sign_in("github", None),
            Err(AppError::NotFound {
                code: "PROVIDER_NOT_FOUND",
                ..
            })
        ));
        assert!(matches!(
            service.start_social_sign_in("google", Some("https://evil.example.net/")),
            Err(AppError::Forbidden {
                code: "INVALID_CALLBACK_URL",
                ..
            })
        ));

        let redirect = service
            .start_social_sign_in("google", Some("/dashboard"))
            .unwrap();
        assert!(redirect.url.contains("client_id="));
        assert_eq!(
            redirect.state_cookie.name(),
            service.cookies().oauth_state_cookie_name()
        );
    }

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("ana@example.com"));
        assert!(!is_plausible_email("ana"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ana@"));
        assert!(!is_plausible_email("a na@example.com"));
    }
}
