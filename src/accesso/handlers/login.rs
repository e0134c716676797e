use crate::{
    accesso::{
        gate::session_cookie,
        handlers::{html_escape, redirect_found, safe_next, valid_username},
        identity::IdentityStore,
        session::SessionStore,
    },
    cli::globals::GlobalArgs,
};
use axum::{
    extract::{Extension, Query},
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

const GENERIC_ERROR: &str = "Invalid username or password. Please try again.";

#[derive(Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// Transient credential submission. Never persisted, never logged.
#[derive(Deserialize, ToSchema)]
pub struct AuthRequest {
    username: String,
    password: String,
    next: Option<String>,
}

// axum handler for the login form
pub async fn login_form(Query(query): Query<NextQuery>) -> impl IntoResponse {
    let next = query.next.as_deref().filter(|next| safe_next(next));

    Html(render_form(next, None))
}

#[utoipa::path(
    post,
    path= "/accounts/login/",
    request_body(content = AuthRequest, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 302, description = "Login successful, redirects to the preserved destination"),
        (status = 200, description = "Invalid credentials, login form re-rendered", content_type = "text/html"),
    ),
    tag= "login"
)]
// axum handler for credential submission
#[instrument(skip_all)]
pub async fn login(
    Extension(identities): Extension<IdentityStore>,
    Extension(sessions): Extension<SessionStore>,
    Extension(globals): Extension<GlobalArgs>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    Form(form): Form<AuthRequest>,
) -> Response {
    // The hidden form field wins, then the query string, then the default.
    let next = form
        .next
        .as_deref()
        .or(query.next.as_deref())
        .filter(|next| safe_next(next))
        .unwrap_or(&globals.default_next)
        .to_string();

    if !valid_username(&form.username) {
        warn!("login rejected: malformed username");

        return failed_login(&next);
    }

    match identities.verify(&form.username, &form.password) {
        Some(user) => {
            let session = sessions.create(&user).await;

            info!(username = %user.username, "login successful");

            let jar = jar.add(session_cookie(&session.token, globals.session_ttl));

            (jar, redirect_found(&next)).into_response()
        }
        None => {
            // Same response whether the username exists or not.
            info!("login failed");

            failed_login(&next)
        }
    }
}

fn failed_login(next: &str) -> Response {
    Html(render_form(Some(next), Some(GENERIC_ERROR))).into_response()
}

fn render_form(next: Option<&str>, error: Option<&str>) -> String {
    let error_html = error.map_or_else(String::new, |error| {
        format!("<p class=\"error\">{error}</p>\n")
    });
    let next_field = next.map_or_else(String::new, |next| {
        format!(
            "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
            html_escape(next)
        )
    });

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Sign in</title></head>
<body>
<h1>Sign in</h1>
{error_html}<form method="post">
<label>Username <input type="text" name="username" autofocus></label>
<label>Password <input type="password" name="password"></label>
{next_field}<button type="submit">Sign in</button>
</form>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_form_plain() {
        let page = render_form(None, None);

        assert!(page.contains("name=\"username\""));
        assert!(page.contains("name=\"password\""));
        assert!(!page.contains("name=\"next\""));
        assert!(!page.contains("class=\"error\""));
    }

    #[test]
    fn test_render_form_with_next_and_error() {
        let page = render_form(Some("/dashboard/"), Some(GENERIC_ERROR));

        assert!(page.contains("<input type=\"hidden\" name=\"next\" value=\"/dashboard/\">"));
        assert!(page.contains(GENERIC_ERROR));
    }

    #[test]
    fn test_render_form_escapes_next() {
        let page = render_form(Some("/\"><script>"), None);

        assert!(!page.contains("\"><script>"));
        assert!(page.contains("&quot;&gt;&lt;script&gt;"));
    }
}
