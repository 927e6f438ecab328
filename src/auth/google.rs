//! Google OAuth provider
//!
//! Authorization code flow against Google's OAuth 2.0 / OpenID endpoints.
//! Endpoint URLs come from configuration so tests can point them at a
//! local fake.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::config::GoogleProviderConfig;
use crate::error::AppError;

pub const PROVIDER_ID: &str = "google";

const SCOPES: &str = "openid email profile";

/// Profile and tokens returned by a successful code exchange
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    /// Google's stable user id (`sub`)
    pub subject: String,
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: bool,
    name: Option<String>,
    picture: Option<String>,
}

pub struct GoogleProvider {
    config: GoogleProviderConfig,
    redirect_uri: String,
    http_client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(
        config: GoogleProviderConfig,
        redirect_uri: String,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            redirect_uri,
            http_client,
        }
    }

    /// URL the browser is sent to in order to grant access
    pub fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("state", state),
            ("access_type", "offline"),
            ("prompt", "select_account"),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.authorization_url, query)
    }

    /// Exchange an authorization code for tokens and the user's profile
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, AppError> {
        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::OAuth(format!(
                "token exchange failed with {}: {}",
                status, body
            )));
        }

        let tokens: TokenResponse = response.json().await?;

        let response = self
            .http_client
            .get(&self.config.userinfo_url)
            .bearer_auth(&tokens.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::OAuth(format!(
                "userinfo request failed with {}",
                response.status()
            )));
        }

        let info: UserInfo = response.json().await?;

        Ok(GoogleProfile {
            subject: info.sub,
            email: info.email,
            email_verified: info.email_verified,
            name: info.name,
            picture: info.picture,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            id_token: tokens.id_token,
            access_token_expires_at: tokens
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            scope: tokens.scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleProvider {
        GoogleProvider::new(
            GoogleProviderConfig {
                client_id: "client-123".to_string(),
                client_secret: "shh".to_string(),
                authorization_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                token_url: "https://oauth2.googleapis.com/token".to_string(),
                userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
            },
            "http://localhost:3000/api/auth/callback/google".to_string(),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn authorization_url_carries_client_and_state() {
        let url = provider().authorization_url("state-abc");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=state-abc"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback%2Fgoogle"
        ));
        assert!(!url.contains("shh"));
    }
}
