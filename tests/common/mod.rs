//! Common test utilities for E2E tests

#![allow(dead_code)]

pub mod fake_google;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse::auth::RequestContext;
use gatehouse::config::AppConfig;
use gatehouse::data::{
    Account, AuthStore, EntityId, MemoryStore, Session, SessionWithUser, User,
};
use gatehouse::error::AppError;
use gatehouse::{AppState, build_router};
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub client: reqwest::Client,
    pub google: Option<fake_google::FakeGoogle>,
    /// Backing store, when the server runs on a `MemoryStore`
    pub memory: Option<Arc<MemoryStore>>,
}

impl TestServer {
    /// Create a new test server over an empty in-memory store
    pub async fn new() -> Self {
        let memory = Arc::new(MemoryStore::new());
        let mut server = Self::start(memory.clone(), None).await;
        server.memory = Some(memory);
        server
    }

    /// Create a test server whose Google endpoints point at a local fake
    pub async fn with_fake_google(profile: fake_google::FakeProfile) -> Self {
        let google = fake_google::FakeGoogle::start(profile).await;
        let memory = Arc::new(MemoryStore::new());
        let mut server = Self::start(memory.clone(), Some(google)).await;
        server.memory = Some(memory);
        server
    }

    /// Create a test server over a specific store
    pub async fn with_store(store: Arc<dyn AuthStore>) -> Self {
        Self::start(store, None).await
    }

    async fn start(store: Arc<dyn AuthStore>, google: Option<fake_google::FakeGoogle>) -> Self {
        // Bind first so the base URL is known before configuration
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let mut env: config::Map<String, String> = [
            ("BETTER_AUTH_SECRET", "test-secret-key-32-bytes-long!!!"),
            ("BETTER_AUTH_URL", addr_str.as_str()),
            ("AUTH_GOOGLE_ID", "test-google-client"),
            ("AUTH_GOOGLE_SECRET", "test-google-secret"),
            ("GATEHOUSE__DATABASE__PROVIDER", "memory"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        if let Some(google) = &google {
            env.insert(
                "GATEHOUSE__AUTH__SOCIAL_PROVIDERS__GOOGLE__TOKEN_URL".to_string(),
                google.url("/token"),
            );
            env.insert(
                "GATEHOUSE__AUTH__SOCIAL_PROVIDERS__GOOGLE__USERINFO_URL".to_string(),
                google.url("/userinfo"),
            );
        }

        let config = AppConfig::load_from_env(&env).unwrap();
        let state = AppState::with_store(config, store).unwrap();
        gatehouse::metrics::init_metrics();

        let app = build_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        Self {
            addr: addr_str,
            state,
            client,
            google,
            memory: None,
        }
    }

    /// Get base URL for requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Sign up through the API and return the `Cookie` header value
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/sign-up/email"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "sign-up failed");
        cookie_header(&response, &self.session_cookie_name()).expect("session cookie set")
    }

    /// Create a session for a fresh user directly through the service
    pub async fn session_cookie_for(&self, name: &str) -> String {
        let now = Utc::now();
        let user = User {
            id: EntityId::new().0,
            name: name.to_string(),
            email: format!("{}@example.com", EntityId::new().0.to_lowercase()),
            email_verified: true,
            image: None,
            created_at: now,
            updated_at: now,
        };

        self.state.auth.store().create_user(&user).await.unwrap();
        let (_session, cookie) = self
            .state
            .auth
            .create_session(&user, &RequestContext::default(), true)
            .await
            .unwrap();
        format!("{}={}", cookie.name(), cookie.value())
    }

    pub fn session_cookie_name(&self) -> String {
        self.state.auth.cookies().session_cookie_name()
    }
}

/// `name=value` of the first `Set-Cookie` for `name`, if any
pub fn cookie_header(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(ToOwned::to_owned)
}

/// Store whose every operation fails, as if the database were down
pub struct FailingStore;

fn down() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AuthStore for FailingStore {
    async fn create_user(&self, _user: &User) -> Result<(), AppError> {
        Err(down())
    }

    async fn find_user_by_id(&self, _id: &str) -> Result<Option<User>, AppError> {
        Err(down())
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, AppError> {
        Err(down())
    }

    async fn create_account(&self, _account: &Account) -> Result<(), AppError> {
        Err(down())
    }

    async fn create_user_with_account(
        &self,
        _user: &User,
        _account: &Account,
    ) -> Result<(), AppError> {
        Err(down())
    }

    async fn find_account(
        &self,
        _provider_id: &str,
        _account_id: &str,
    ) -> Result<Option<Account>, AppError> {
        Err(down())
    }

    async fn find_credential_account(&self, _user_id: &str) -> Result<Option<Account>, AppError> {
        Err(down())
    }

    async fn create_session(&self, _session: &Session) -> Result<(), AppError> {
        Err(down())
    }

    async fn find_session(&self, _token: &str) -> Result<Option<SessionWithUser>, AppError> {
        Err(down())
    }

    async fn update_session_expiry(
        &self,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        Err(down())
    }

    async fn delete_session(&self, _token: &str) -> Result<(), AppError> {
        Err(down())
    }

    async fn list_sessions_for_user(&self, _user_id: &str) -> Result<Vec<Session>, AppError> {
        Err(down())
    }
}
