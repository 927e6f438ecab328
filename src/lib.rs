//! Gatehouse - a session-gated dashboard with built-in authentication
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Layer (Axum)                       │
//! │  - Pages: landing page, session-gated dashboard             │
//! │  - Auth API: /api/auth/*                                    │
//! │  - Health, metrics                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Authentication Service                    │
//! │  - Signed session cookies                                   │
//! │  - Email/password (argon2) and Google OAuth                 │
//! │  - Trusted origin checks                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - PostgreSQL (sqlx)                                        │
//! │  - In-memory store                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `web`: Server-rendered pages
//! - `auth`: Authentication service, routes and middleware
//! - `api`: Metrics endpoint
//! - `data`: Users, accounts and sessions storage
//! - `config`: Configuration management
//! - `error`: Error types

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod web;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Cloned for each request. Both members are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Authentication service
    pub auth: Arc<auth::AuthService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect the configured store
    /// 2. Build the HTTP client for OAuth providers
    /// 3. Build the auth service
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        let store: Arc<dyn data::AuthStore> = match config.database.provider {
            config::DatabaseProvider::Postgresql => {
                let db = data::Database::connect(&config.database).await?;
                Arc::new(db)
            }
            config::DatabaseProvider::Memory => {
                tracing::warn!("Using in-memory store; sessions and users are lost on restart");
                Arc::new(data::MemoryStore::new())
            }
        };

        let state = Self::with_store(config, store)?;
        tracing::info!("Application state initialized successfully");
        Ok(state)
    }

    /// Initialize application state over an existing store
    pub fn with_store(
        config: config::AppConfig,
        store: Arc<dyn data::AuthStore>,
    ) -> Result<Self, error::AppError> {
        let http_client = reqwest::Client::builder()
            .user_agent("Gatehouse/0.1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        let auth = auth::AuthService::new(config.auth.clone(), store, http_client);

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::trace::TraceLayer;

    let cors_layer = build_cors_layer(&state.config.auth.trusted_origins);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(web::pages_router())
        .nest("/api/auth", auth::auth_router(state.clone()))
        .merge(api::metrics_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// CORS for the trusted origins, with credentials allowed
fn build_cors_layer(trusted_origins: &[String]) -> tower_http::cors::CorsLayer {
    use axum::http::{HeaderValue, Method, header};
    use tower_http::cors::{AllowOrigin, CorsLayer};

    let origins: Vec<HeaderValue> = trusted_origins
        .iter()
        .filter_map(|origin| {
            let trimmed = origin.trim_end_matches('/');
            match HeaderValue::from_str(trimmed) {
                Ok(value) => Some(value),
                Err(error) => {
                    tracing::error!(%error, %origin, "Ignoring unparsable trusted origin for CORS");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn health_check() -> &'static str {
    "OK"
}
