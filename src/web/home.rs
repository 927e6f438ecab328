//! Public landing page

use axum::response::{Html, IntoResponse};

use crate::auth::MaybeUser;

/// GET /
///
/// Sign-in form and Google button for visitors, a dashboard link for
/// signed-in users.
pub async fn home(MaybeUser(session): MaybeUser) -> impl IntoResponse {
    let body = match session {
        Some(current) => format!(
            r#"<p>Welcome back, {}.</p>
        <a href="/dashboard">Go to dashboard</a>"#,
            html_escape::encode_text(&current.user.name)
        ),
        None => SIGN_IN_FORM.to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Gatehouse</title></head>
<body>
    <main>
        <h1>Gatehouse</h1>
        {body}
    </main>
</body>
</html>
"#
    ))
}

const SIGN_IN_FORM: &str = r#"<form id="sign-in">
            <input name="email" type="email" placeholder="Email" required />
            <input name="password" type="password" placeholder="Password" required />
            <button type="submit">Sign in</button>
        </form>
        <p id="sign-in-error" role="alert"></p>
        <button id="google" type="button">Sign in with Google</button>
        <script>
            const post = (path, body) => fetch(path, {
                method: "POST",
                credentials: "same-origin",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify(body),
            });

            document.getElementById("sign-in").addEventListener("submit", async (event) => {
                event.preventDefault();
                const form = new FormData(event.target);
                const response = await post("/api/auth/sign-in/email", {
                    email: form.get("email"),
                    password: form.get("password"),
                    callbackURL: "/dashboard",
                });
                if (response.ok) {
                    window.location.href = "/dashboard";
                } else {
                    const error = await response.json();
                    document.getElementById("sign-in-error").textContent = error.message;
                }
            });

            document.getElementById("google").addEventListener("click", async () => {
                const response = await post("/api/auth/sign-in/social", {
                    provider: "google",
                    callbackURL: "/dashboard",
                });
                const { url } = await response.json();
                window.location.href = url;
            });
        </script>"#;
