use crate::{
    accesso::{
        handlers::{encode_next, redirect_found},
        session::{Session, SessionStore},
    },
    cli::globals::GlobalArgs,
};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::time::Duration;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sessionid";

/// Outcome of checking a request against the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    DenyRedirect(String),
}

/// Decide whether a request may reach a protected resource.
///
/// Pure: the session store read happens at the caller. The deny destination
/// carries the original path, percent-encoded so a query string inside it
/// survives as a single `next` value, so a later login can return the user
/// there.
#[must_use]
pub fn check(session: Option<&Session>, path: &str, login_path: &str) -> AccessDecision {
    match session {
        Some(_) => AccessDecision::Allow,
        None => AccessDecision::DenyRedirect(format!("{login_path}?next={}", encode_next(path))),
    }
}

/// Middleware guarding protected routes.
///
/// On `Allow` the session rides along in the request extensions for the
/// handler; on `DenyRedirect` the client gets a 302 to the login page with
/// the original destination preserved in the `next` parameter.
pub async fn require_session(
    Extension(sessions): Extension<SessionStore>,
    Extension(globals): Extension<GlobalArgs>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => sessions.get(cookie.value()).await,
        None => None,
    };

    let path = request.uri().path_and_query().map_or_else(
        || request.uri().path().to_string(),
        |pq| pq.as_str().to_string(),
    );

    match check(session.as_ref(), &path, &globals.login_path) {
        AccessDecision::Allow => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }

            next.run(request).await
        }
        AccessDecision::DenyRedirect(destination) => redirect_found(&destination),
    }
}

/// Session cookie scoped to the whole site.
#[must_use]
pub fn session_cookie(token: &str, ttl: Duration) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(
            i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        ))
        .build()
}

/// Removal cookie for the session, with the same attributes as the cookie it
/// clears so the browser matches them up.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accesso::identity::User;
    use std::time::Instant;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            token: "opaque".to_string(),
            user: User {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
            },
            created_at: Instant::now(),
        }
    }

    #[test]
    fn test_check_allows_active_session() {
        let session = session();
        assert_eq!(
            check(Some(&session), "/dashboard/", "/accounts/login/"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_check_denies_anonymous_with_next() {
        assert_eq!(
            check(None, "/dashboard/", "/accounts/login/"),
            AccessDecision::DenyRedirect("/accounts/login/?next=/dashboard/".to_string())
        );
    }

    #[test]
    fn test_check_encodes_query_in_next() {
        assert_eq!(
            check(None, "/dashboard/?a=1&b=2", "/accounts/login/"),
            AccessDecision::DenyRedirect(
                "/accounts/login/?next=/dashboard/%3Fa%3D1%26b%3D2".to_string()
            )
        );
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("opaque", Duration::from_secs(3600));

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "opaque");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
