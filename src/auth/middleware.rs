//! Authentication middleware
//!
//! Protects routes that require a signed-in user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::data::SessionWithUser;
use crate::error::AppError;

/// Middleware to require authentication
///
/// Resolves the session from the request cookie and adds it to the
/// request extensions. Requests without a session get 401.
///
/// # Usage
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/metrics", ...)
///     .layer(middleware::from_fn_with_state(state, require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = state
        .auth
        .get_session(request.headers())
        .await?
        .ok_or_else(AppError::unauthorized)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Extractor for current authenticated user
///
/// # Usage
/// ```ignore
/// async fn handler(
///     CurrentUser(current): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}", current.user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionWithUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<SessionWithUser>().cloned() {
            return Ok(CurrentUser(session));
        }

        let state = AppState::from_ref(state);
        let session = state
            .auth
            .get_session(&parts.headers)
            .await?
            .ok_or_else(AppError::unauthorized)?;
        parts.extensions.insert(session.clone());

        Ok(CurrentUser(session))
    }
}

/// Optional current user extractor
///
/// Returns None if not authenticated. Store failures are still
/// rejections.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionWithUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<SessionWithUser>().cloned() {
            return Ok(MaybeUser(Some(session)));
        }

        let app_state = AppState::from_ref(state);
        let session = app_state.auth.get_session(&parts.headers).await?;

        if let Some(session) = &session {
            parts.extensions.insert(session.clone());
        }

        Ok(MaybeUser(session))
    }
}
