//! Error types for Gatehouse
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
///
/// Auth failures carry a machine-readable code so browser scripts can
/// react to them without parsing messages.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found (404)
    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    /// Authentication required or rejected (401)
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    /// Access denied (403)
    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unprocessable entity (422)
    #[error("{message}")]
    Unprocessable { code: &'static str, message: String },

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client error (502)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Upstream OAuth provider rejected a request (502)
    #[error("OAuth provider error: {0}")]
    OAuth(String),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Signing or hashing error (500)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 401 with the generic "no valid session" code
    pub fn unauthorized() -> Self {
        AppError::Unauthorized {
            code: "UNAUTHORIZED",
            message: "Authentication required".to_string(),
        }
    }

    pub fn unauthorized_with(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Forbidden {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        AppError::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn unprocessable(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Unprocessable {
            code,
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::HttpClient(_) | AppError::OAuth(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_)
            | AppError::Config(_)
            | AppError::Encryption(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Client errors expose their message and code. Server-side failures
    /// are logged and answered with a generic body.
    fn into_response(self) -> Response {
        use axum::Json;

        let status = self.status();
        let (code, message, error_type) = match &self {
            AppError::NotFound { code, message } => (*code, message.clone(), "not_found"),
            AppError::Unauthorized { code, message } => (*code, message.clone(), "unauthorized"),
            AppError::Forbidden { code, message } => (*code, message.clone(), "forbidden"),
            AppError::Unprocessable { code, message } => {
                (*code, message.clone(), "unprocessable")
            }
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone(), "validation"),
            AppError::HttpClient(_) => ("BAD_GATEWAY", self.to_string(), "http_client"),
            AppError::OAuth(_) => ("OAUTH_PROVIDER_ERROR", self.to_string(), "oauth"),
            AppError::Database(_) => (
                "INTERNAL_SERVER_ERROR",
                "Internal server error".to_string(),
                "database",
            ),
            AppError::Config(_) => (
                "INTERNAL_SERVER_ERROR",
                "Internal server error".to_string(),
                "config",
            ),
            AppError::Encryption(_) => (
                "INTERNAL_SERVER_ERROR",
                "Internal server error".to_string(),
                "encryption",
            ),
            AppError::Internal(_) => (
                "INTERNAL_SERVER_ERROR",
                "Internal server error".to_string(),
                "internal",
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, error_type, "Request failed");
        }

        crate::metrics::ERRORS_TOTAL
            .with_label_values(&[error_type])
            .inc();

        let body = Json(serde_json::json!({
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
