//! Auth HTTP API
//!
//! Mounted under `/api/auth`. JSON in, JSON out, with the session
//! carried in a signed cookie.

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use super::middleware::{CurrentUser, MaybeUser};
use super::origin::request_origin;
use super::service::{RequestContext, SignInRequest, SignUpRequest, invalid_callback_url};
use crate::AppState;
use crate::error::AppError;

/// Create authentication router
///
/// Routes:
/// - POST /sign-up/email
/// - POST /sign-in/email
/// - POST /sign-in/social
/// - GET  /callback/:provider
/// - POST /sign-out
/// - GET  /get-session
/// - GET  /list-sessions
pub fn auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/sign-up/email", post(sign_up_email))
        .route("/sign-in/email", post(sign_in_email))
        .route("/sign-in/social", post(sign_in_social))
        .route("/callback/:provider", get(social_callback))
        .route("/sign-out", post(sign_out))
        .route("/get-session", get(get_session))
        .route("/list-sessions", get(list_sessions))
        .route_layer(middleware::from_fn_with_state(state, verify_origin))
}

/// Reject state-changing requests coming from untrusted browser origins
///
/// Requests without `Origin`/`Referer` (non-browser clients) pass.
async fn verify_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let safe_method = matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    );

    if !safe_method {
        if let Some(origin) = request_origin(request.headers()) {
            if !state.auth.is_trusted_origin(&origin) {
                tracing::warn!(%origin, path = %request.uri().path(), "Rejected untrusted origin");
                return Err(AppError::forbidden("INVALID_ORIGIN", "Invalid origin"));
            }
        }
    }

    Ok(next.run(request).await)
}

fn check_callback_url(state: &AppState, callback_url: Option<&str>) -> Result<(), AppError> {
    match callback_url {
        Some(url) if !state.auth.is_trusted_origin(url) => Err(invalid_callback_url()),
        _ => Ok(()),
    }
}

// =============================================================================
// Email + password
// =============================================================================

/// POST /api/auth/sign-up/email
async fn sign_up_email(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_callback_url(&state, request.callback_url.as_deref())?;

    let ctx = RequestContext::from_headers(&headers);
    let outcome = state.auth.sign_up_email(request, &ctx).await?;

    let jar = match outcome.cookie {
        Some(cookie) => jar.add(cookie),
        None => jar,
    };
    let token = outcome.session.map(|session| session.token);

    Ok((
        jar,
        Json(json!({
            "token": token,
            "user": outcome.user,
        })),
    ))
}

/// POST /api/auth/sign-in/email
async fn sign_in_email(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    check_callback_url(&state, request.callback_url.as_deref())?;

    let callback_url = request.callback_url.clone();
    let ctx = RequestContext::from_headers(&headers);
    let outcome = state.auth.sign_in_email(request, &ctx).await?;

    let jar = match outcome.cookie {
        Some(cookie) => jar.add(cookie),
        None => jar,
    };
    let token = outcome.session.map(|session| session.token);

    Ok((
        jar,
        Json(json!({
            "redirect": callback_url.is_some(),
            "token": token,
            "url": callback_url,
            "user": outcome.user,
        })),
    ))
}

// =============================================================================
// Social sign-in
// =============================================================================

#[derive(Debug, Deserialize)]
struct SocialSignInRequest {
    provider: String,
    #[serde(default, rename = "callbackURL")]
    callback_url: Option<String>,
}

/// POST /api/auth/sign-in/social
///
/// Returns the provider URL; the browser navigates there itself.
async fn sign_in_social(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SocialSignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let redirect = state
        .auth
        .start_social_sign_in(&request.provider, request.callback_url.as_deref())?;

    Ok((
        jar.add(redirect.state_cookie),
        Json(json!({
            "url": redirect.url,
            "redirect": true,
        })),
    ))
}

/// Query parameters from the provider callback
#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// GET /api/auth/callback/:provider
async fn social_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(error) = query.error {
        tracing::warn!(%provider, %error, "OAuth provider returned an error");
        return Err(AppError::unauthorized_with("OAUTH_DENIED", error));
    }

    let (Some(code), Some(oauth_state)) = (query.code, query.state) else {
        return Err(AppError::unauthorized_with(
            "INVALID_STATE",
            "Missing code or state",
        ));
    };

    let ctx = RequestContext::from_headers(&headers);
    let callback = state
        .auth
        .finish_social_sign_in(&provider, &code, &oauth_state, &headers, &ctx)
        .await?;

    let location =
        HeaderValue::from_str(&callback.redirect_to).map_err(|_| invalid_callback_url())?;
    let jar = jar
        .add(state.auth.cookies().clear_oauth_state_cookie())
        .add(callback.session_cookie);

    Ok((StatusCode::SEE_OTHER, jar, [(header::LOCATION, location)]))
}

// =============================================================================
// Sessions
// =============================================================================

/// POST /api/auth/sign-out
async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    state.auth.sign_out(&headers).await?;

    Ok((
        jar.add(state.auth.cookies().clear_session_cookie()),
        Json(json!({ "success": true })),
    ))
}

/// GET /api/auth/get-session
///
/// Responds with `null` when there is no session.
async fn get_session(MaybeUser(session): MaybeUser) -> impl IntoResponse {
    Json(session)
}

/// GET /api/auth/list-sessions
async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.auth.list_sessions(&current.user.id).await?;
    Ok(Json(sessions))
}
