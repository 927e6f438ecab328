//! Minimal stand-in for Google's token and userinfo endpoints

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

/// The only authorization code the fake accepts
pub const GOOD_CODE: &str = "good-code";
const ACCESS_TOKEN: &str = "fake-access-token";

#[derive(Debug, Clone)]
pub struct FakeProfile {
    pub sub: String,
    pub email: String,
    pub email_verified: bool,
    pub name: String,
}

pub struct FakeGoogle {
    addr: String,
}

impl FakeGoogle {
    pub async fn start(profile: FakeProfile) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("http://{}", listener.local_addr().unwrap());

        let app = Router::new()
            .route("/token", post(token))
            .route("/userinfo", get(userinfo))
            .with_state(profile);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenForm {
    code: String,
    client_id: String,
    grant_type: String,
}

async fn token(Form(form): Form<TokenForm>) -> Response {
    if form.code != GOOD_CODE
        || form.client_id != "test-google-client"
        || form.grant_type != "authorization_code"
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599,
        "scope": "openid email profile",
        "id_token": "fake.id.token",
    }))
    .into_response()
}

async fn userinfo(State(profile): State<FakeProfile>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", ACCESS_TOKEN));

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!({
        "sub": profile.sub,
        "email": profile.email,
        "email_verified": profile.email_verified,
        "name": profile.name,
        "picture": "https://example.com/avatar.png",
    }))
    .into_response()
}
