pub mod dashboard;
pub use self::dashboard::dashboard;

pub mod health;
pub use self::health::health;

pub mod home;
pub use self::home::home;

pub mod login;
pub use self::login::{login, login_form};

pub mod logout;
pub use self::logout::logout;

pub mod tech_demo;
pub use self::tech_demo::tech_demo;

// common functions for the handlers
use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use url::Url;

// Keep `/` readable so plain paths stay recognizable in the location bar.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_.@+-]{1,150}$").map_or(false, |re| re.is_match(username))
}

/// Escape a destination for use as the `next` query parameter value, so a
/// query string inside the destination cannot split the login URL's own
/// query. `Query` percent-decodes on the way back in, round-tripping it.
pub fn encode_next(path: &str) -> String {
    utf8_percent_encode(path, NEXT_ENCODE_SET).to_string()
}

/// Accept only site-relative destinations for the post-login redirect;
/// anything with a scheme or authority could bounce the browser off-site.
pub fn safe_next(next: &str) -> bool {
    if !next.starts_with('/') || next.starts_with("//") || next.starts_with("/\\") {
        return false;
    }

    // Absolute URLs parse on their own, relative paths need a base.
    Url::parse(next).is_err()
}

/// 302 Found. The framework helpers emit 303/307/308, the observed
/// behavior is a plain 302.
pub fn redirect_found(destination: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, destination.to_string())]).into_response()
}

/// Minimal escaping for values interpolated into the inline pages.
pub fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_valid_username() {
        assert!(valid_username("alice"));
        assert!(valid_username("alice.liddell@wonderland"));
        assert!(valid_username("user_01+test-2"));

        assert!(!valid_username(""));
        assert!(!valid_username("spaced name"));
        assert!(!valid_username("semi;colon"));
        assert!(!valid_username(&"a".repeat(151)));
    }

    #[test]
    fn test_encode_next() {
        assert_eq!(encode_next("/dashboard/"), "/dashboard/");
        assert_eq!(
            encode_next("/dashboard/?a=1&b=2"),
            "/dashboard/%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_safe_next() {
        assert!(safe_next("/dashboard/"));
        assert!(safe_next("/accounts/tech-demo/"));
        assert!(safe_next("/dashboard/?tab=sessions"));

        assert!(!safe_next(""));
        assert!(!safe_next("dashboard"));
        assert!(!safe_next("//evil.example/"));
        assert!(!safe_next("/\\evil.example/"));
        assert!(!safe_next("https://evil.example/"));
        assert!(!safe_next("javascript:alert(1)"));
    }

    #[test]
    fn test_redirect_found() {
        let response = redirect_found("/accounts/login/");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/accounts/login/")
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>"&"</script>"#),
            "&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"
        );
    }
}
