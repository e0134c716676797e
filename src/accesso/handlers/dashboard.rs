use crate::accesso::{handlers::html_escape, session::Session};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
};

// axum handler for the dashboard, reachable only through the gate
pub async fn dashboard(Extension(session): Extension<Session>) -> impl IntoResponse {
    let username = html_escape(&session.user.username);

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Dashboard</title></head>
<body>
<h1>Dashboard</h1>
<p>Welcome back, {username}!</p>
<p><a href="/accounts/tech-demo/">Tech demo</a> | <a href="/accounts/logout/">Sign out</a></p>
</body>
</html>
"#
    ))
}
