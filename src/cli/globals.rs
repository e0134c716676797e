use std::time::Duration;

/// Where the gate sends anonymous requests.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Landing page after login when no "next" destination was preserved.
pub const DEFAULT_NEXT: &str = "/dashboard/";

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub session_ttl: Duration,
    pub login_path: String,
    pub default_next: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            session_ttl,
            login_path: LOGIN_PATH.to_string(),
            default_next: DEFAULT_NEXT.to_string(),
        }
    }
}
