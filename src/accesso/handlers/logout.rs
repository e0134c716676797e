use crate::{
    accesso::{
        gate::{clear_session_cookie, SESSION_COOKIE},
        handlers::redirect_found,
        session::SessionStore,
    },
    cli::globals::GlobalArgs,
};
use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};

#[utoipa::path(
    get,
    path= "/accounts/logout/",
    responses (
        (status = 302, description = "Session destroyed, redirects to the login page"),
    ),
    tag= "logout"
)]
// axum handler for logout
#[instrument(skip_all)]
pub async fn logout(
    Extension(sessions): Extension<SessionStore>,
    Extension(globals): Extension<GlobalArgs>,
    jar: CookieJar,
) -> Response {
    // Logging out without a session is fine, the redirect is the same.
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if sessions.destroy(cookie.value()).await {
            info!("session destroyed");
        }
    }

    let jar = jar.add(clear_session_cookie());

    (jar, redirect_found(&globals.login_path)).into_response()
}
