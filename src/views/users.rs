use std::fmt::Write;

use actix_web::HttpResponse;

use super::{delete_link, detail_row, escape, optional_number, page};
use crate::authentication::PageContext;
use crate::models::{Course, Subscriber, User};

pub fn index_view(ctx: &PageContext, users: &[User]) -> HttpResponse {
    let mut rows = String::new();
    for u in users {
        writeln!(
            rows,
            r#"<tr>
            <td><a href="/users/{id}">{name}</a></td>
            <td>{email}</td>
            <td>{zip}</td>
            <td><a href="/users/{id}/edit">Edit</a> {delete}</td>
        </tr>"#,
            id = u.id,
            name = escape(&u.full_name()),
            email = escape(&u.email),
            zip = optional_number(u.zip_code),
            delete = delete_link(&format!("/users/{}/delete", u.id)),
        )
        .expect("writing to a String cannot fail");
    }

    page(
        ctx,
        "Users",
        &format!(
            r#"<h1>Users</h1>
    <table>
        <tr><th>Name</th><th>Email</th><th>Zip code</th><th></th></tr>
        {rows}
    </table>
    <p><a href="/users/new">Create an account</a></p>"#
        ),
    )
}

pub fn new_view(ctx: &PageContext) -> HttpResponse {
    page(
        ctx,
        "Sign up",
        &format!(
            "<h1>Create an account</h1>\n{}",
            form("/users/create", None, "Sign up")
        ),
    )
}

/// `courses` holds the user's resolved courses; references to deleted
/// courses are simply not listed.
pub fn show_view(
    ctx: &PageContext,
    user: &User,
    courses: &[Course],
    subscriber: Option<&Subscriber>,
) -> HttpResponse {
    let subscribed_account = match (user.subscribed_account, subscriber) {
        (Some(id), Some(s)) => format!(
            r#"<a href="/subscribers/{id}" class="subscribed-account">{}</a>"#,
            escape(&s.email)
        ),
        (Some(id), None) => {
            format!(r#"<span class="subscribed-account">{id}</span>"#)
        }
        (None, _) => "None".to_string(),
    };

    let mut course_list = String::new();
    for c in courses {
        writeln!(
            course_list,
            r#"<li><a href="/courses/{}">{}</a></li>"#,
            c.id,
            escape(&c.title)
        )
        .expect("writing to a String cannot fail");
    }

    page(
        ctx,
        &user.full_name(),
        &format!(
            r#"<h1>{name}</h1>
    <table>
        {email}
        {zip}
        <tr><th>Subscribed account</th><td>{subscribed_account}</td></tr>
        {created}
    </table>
    <h2>Courses</h2>
    <ul>
        {course_list}
    </ul>
    <p><a href="/users/{id}/edit">Edit</a> {delete}</p>
    <p><a href="/users">All users</a></p>"#,
            name = escape(&user.full_name()),
            email = detail_row("Email", &user.email),
            zip = detail_row("Zip code", &optional_number(user.zip_code)),
            created = detail_row(
                "Member since",
                &user.created_at.format("%Y-%m-%d").to_string()
            ),
            id = user.id,
            delete = delete_link(&format!("/users/{}/delete", user.id)),
        ),
    )
}

pub fn edit_view(ctx: &PageContext, user: &User) -> HttpResponse {
    page(
        ctx,
        "Edit user",
        &format!(
            "<h1>Edit {}</h1>\n{}",
            escape(&user.full_name()),
            form(
                &format!("/users/{}/update?_method=PUT", user.id),
                Some(user),
                "Update"
            )
        ),
    )
}

pub fn login_view(ctx: &PageContext) -> HttpResponse {
    page(
        ctx,
        "Log in",
        r#"<h1>Log in</h1>
    <form action="/users/login" method="POST">
        <label>Email <input type="email" name="email" required></label>
        <label>Password <input type="password" name="password" required></label>
        <button type="submit">Log in</button>
    </form>"#,
    )
}

/// The password field is only offered on signup.
fn form(action: &str, user: Option<&User>, submit: &str) -> String {
    let first = user.map(|u| escape(&u.first_name)).unwrap_or_default();
    let last = user.map(|u| escape(&u.last_name)).unwrap_or_default();
    let email = user.map(|u| escape(&u.email)).unwrap_or_default();
    let zip = optional_number(user.and_then(|u| u.zip_code));
    let password = if user.is_none() {
        r#"<label>Password
            <input type="password" name="password" required>
        </label>"#
    } else {
        ""
    };

    format!(
        r#"<form action="{action}" method="POST">
        <label>First name
            <input type="text" name="first" value="{first}" required>
        </label>
        <label>Last name
            <input type="text" name="last" value="{last}" required>
        </label>
        <label>Email
            <input type="email" name="email" value="{email}" required>
        </label>
        {password}
        <label>Zip code
            <input type="text" name="zipCode" value="{zip}" pattern="\d{{5}}">
        </label>
        <button type="submit">{submit}</button>
    </form>"#
    )
}
