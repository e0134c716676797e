use crate::{
    accesso::{gate::SESSION_COOKIE, handlers::redirect_found, session::SessionStore},
    cli::globals::GlobalArgs,
};
use axum::{extract::Extension, response::Response};
use axum_extra::extract::cookie::CookieJar;

// axum handler for the home page: authenticated users land on the
// dashboard, everyone else on the login form
pub async fn home(
    Extension(sessions): Extension<SessionStore>,
    Extension(globals): Extension<GlobalArgs>,
    jar: CookieJar,
) -> Response {
    let authenticated = match jar.get(SESSION_COOKIE) {
        Some(cookie) => sessions.get(cookie.value()).await.is_some(),
        None => false,
    };

    if authenticated {
        redirect_found(&globals.default_next)
    } else {
        redirect_found(&globals.login_path)
    }
}
