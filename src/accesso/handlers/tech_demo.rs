use crate::accesso::{handlers::html_escape, session::Session};
use axum::{
    extract::{ConnectInfo, Extension},
    http::{header::USER_AGENT, HeaderMap},
    response::{Html, IntoResponse},
};
use std::net::SocketAddr;

// axum handler for the tech demo page, reachable only through the gate.
// Shows the request plumbing: session token, user agent, peer address.
pub async fn tech_demo(
    Extension(session): Extension<Session>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let username = html_escape(&session.user.username);
    let token = html_escape(&session.token);
    let user_agent = html_escape(
        headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(""),
    );
    let remote_addr = connect_info.map_or_else(
        || "unknown".to_string(),
        |ConnectInfo(addr)| addr.to_string(),
    );

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Tech demo</title></head>
<body>
<h1>Tech demo</h1>
<p>Signed in as {username}</p>
<ul>
<li>Session key: <code>{token}</code></li>
<li>User agent: <code>{user_agent}</code></li>
<li>Remote address: <code>{remote_addr}</code></li>
</ul>
<p><a href="/dashboard/">Dashboard</a></p>
</body>
</html>
"#
    ))
}
