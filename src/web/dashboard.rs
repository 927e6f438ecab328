//! Protected dashboard
//!
//! The only gate is the session lookup: no session, no page.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::AppState;
use crate::error::AppError;

/// GET /dashboard
///
/// Redirects to `/` without a session. Lookup failures propagate.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(current) = state.auth.get_session(&headers).await? else {
        tracing::debug!("No session for dashboard request, redirecting to /");
        return Ok(Redirect::to("/").into_response());
    };

    Ok(Html(render_dashboard(&current.user.name)).into_response())
}

fn render_dashboard(user_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Dashboard - Gatehouse</title></head>
<body>
    <main>
        <h1>Dashboard</h1>
        <h3>Signed in as: {name}</h3>
        <button id="sign-out" type="button">Sign out</button>
    </main>
    <script>
        document.getElementById("sign-out").addEventListener("click", async () => {{
            await fetch("/api/auth/sign-out", {{ method: "POST", credentials: "same-origin" }});
            window.location.href = "/";
        }});
    </script>
</body>
</html>
"#,
        name = html_escape::encode_text(user_name)
    )
}
