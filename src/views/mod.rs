//! HTML pages. Every page goes through [`page`], which wraps the body in the
//! site layout: navigation bar with the login state and pending flash
//! messages.

pub mod courses;
pub mod errors;
pub mod home;
pub mod subscribers;
pub mod users;

use std::fmt::Write;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use actix_web_flash_messages::Level;

use crate::authentication::PageContext;

/// HTML-escapes text content and attribute values.
pub(crate) fn escape(s: &str) -> String {
    htmlescape::encode_minimal(s)
}

pub fn page(ctx: &PageContext, title: &str, body: &str) -> HttpResponse {
    page_with_status(StatusCode::OK, ctx, title, body)
}

pub fn page_with_status(
    status: StatusCode,
    ctx: &PageContext,
    title: &str,
    body: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(layout(ctx, title, body))
}

fn layout(ctx: &PageContext, title: &str, body: &str) -> String {
    let navigation = navigation(ctx);
    let flash_html = flash_messages(ctx);
    let title = escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>{title} | Confetti Cuisine</title>
</head>
<body>
    {navigation}
    {flash_html}
    <main>
{body}
    </main>
    <footer><p>Confetti Cuisine</p></footer>
</body>
</html>"#
    )
}

fn navigation(ctx: &PageContext) -> String {
    let account = match &ctx.current_user {
        Some(user) => format!(
            r#"<a href="/users/{}">Logged in as {}</a>
        <a href="/users/logout">Log out</a>"#,
            user.id,
            escape(&user.full_name())
        ),
        None => r#"<a href="/users/login">Log in</a>
        <a href="/users/new">Sign up</a>"#
            .to_string(),
    };

    format!(
        r#"<nav>
        <a href="/">Home</a>
        <a href="/courses">Courses</a>
        <a href="/subscribers">Subscribers</a>
        <a href="/users">Users</a>
        {account}
    </nav>"#
    )
}

fn flash_messages(ctx: &PageContext) -> String {
    let mut msg_html = String::new();
    for (level, content) in &ctx.flash_messages {
        writeln!(
            msg_html,
            r#"<p class="flash {}"><i>{}</i></p>"#,
            level_class(*level),
            escape(content)
        )
        .expect("writing to a String cannot fail");
    }
    msg_html
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Success => "success",
        Level::Warning => "warning",
        Level::Error => "error",
    }
}

/// `<tr>` row for a read-only attribute on a detail page.
pub(crate) fn detail_row(label: &str, value: &str) -> String {
    format!("<tr><th>{}</th><td>{}</td></tr>", label, escape(value))
}

/// Link tunnelling a DELETE through GET via `_method`.
pub(crate) fn delete_link(path: &str) -> String {
    format!(r#"<a href="{path}?_method=DELETE">Delete</a>"#)
}

pub(crate) fn optional_number(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
