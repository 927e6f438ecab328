//! E2E tests for the session-gated dashboard

mod common;

use std::sync::Arc;

use common::{FailingStore, TestServer};

fn location(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_dashboard_without_cookie_redirects_home() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/dashboard"))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), Some("/"));
    let body = response.text().await.unwrap();
    assert!(!body.contains("Signed in as"));
}

#[tokio::test]
async fn test_dashboard_shows_signed_in_user() {
    let server = TestServer::new().await;
    let cookie = server.session_cookie_for("Ana").await;

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header("Cookie", cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(location(&response), None);
    let body = response.text().await.unwrap();
    assert!(body.contains("Signed in as: Ana"));
}

#[tokio::test]
async fn test_dashboard_after_email_sign_up() {
    let server = TestServer::new().await;
    let cookie = server
        .sign_up("Bruno", "bruno@example.com", "correct horse battery")
        .await;

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header("Cookie", cookie)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("Bruno"));
}

#[tokio::test]
async fn test_dashboard_with_forged_cookie_redirects_home() {
    let server = TestServer::new().await;
    let forged = gatehouse::auth::signing::sign_value("made-up-token", "not-the-secret").unwrap();

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header(
            "Cookie",
            format!("{}={}", server.session_cookie_name(), forged),
        )
        .send()
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_dashboard_with_unknown_session_redirects_home() {
    let server = TestServer::new().await;
    let secret = &server.state.config.auth.secret;
    let signed = gatehouse::auth::signing::sign_value("no-such-session", secret).unwrap();

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header(
            "Cookie",
            format!("{}={}", server.session_cookie_name(), signed),
        )
        .send()
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_dashboard_after_sign_out_redirects_home() {
    let server = TestServer::new().await;
    let cookie = server.session_cookie_for("Ana").await;

    let response = server
        .client
        .post(server.url("/api/auth/sign-out"))
        .header("Cookie", cookie.as_str())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header("Cookie", cookie.as_str())
        .send()
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_dashboard_lookup_failure_is_not_a_redirect() {
    let server = TestServer::with_store(Arc::new(FailingStore)).await;
    let secret = &server.state.config.auth.secret;
    let signed = gatehouse::auth::signing::sign_value("any-token", secret).unwrap();

    let response = server
        .client
        .get(server.url("/dashboard"))
        .header(
            "Cookie",
            format!("{}={}", server.session_cookie_name(), signed),
        )
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(location(&response), None);
    let body = response.text().await.unwrap();
    assert!(!body.contains("Signed in as"));
    assert!(!body.contains("PoolTimedOut"));
}

#[tokio::test]
async fn test_home_links_signed_in_user_to_dashboard() {
    let server = TestServer::new().await;

    let response = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("Sign in with Google"));

    let cookie = server.session_cookie_for("Ana").await;
    let response = server
        .client
        .get(server.url("/"))
        .header("Cookie", cookie)
        .send()
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("Welcome back, Ana"));
    assert!(body.contains("/dashboard"));
}
