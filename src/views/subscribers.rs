use std::fmt::Write;

use actix_web::HttpResponse;

use super::{delete_link, detail_row, escape, optional_number, page};
use crate::authentication::PageContext;
use crate::models::Subscriber;

pub fn index_view(
    ctx: &PageContext,
    subscribers: &[Subscriber],
) -> HttpResponse {
    let mut rows = String::new();
    for s in subscribers {
        writeln!(
            rows,
            r#"<tr>
            <td><a href="/subscribers/{id}">{name}</a></td>
            <td>{email}</td>
            <td>{zip}</td>
            <td><a href="/subscribers/{id}/edit">Edit</a> {delete}</td>
        </tr>"#,
            id = s.id,
            name = escape(&s.name),
            email = escape(&s.email),
            zip = optional_number(s.zip_code),
            delete = delete_link(&format!("/subscribers/{}/delete", s.id)),
        )
        .expect("writing to a String cannot fail");
    }

    page(
        ctx,
        "Subscribers",
        &format!(
            r#"<h1>Subscribers</h1>
    <table>
        <tr><th>Name</th><th>Email</th><th>Zip code</th><th></th></tr>
        {rows}
    </table>
    <p><a href="/subscribers/new">Subscribe</a></p>"#
        ),
    )
}

pub fn new_view(ctx: &PageContext) -> HttpResponse {
    page(
        ctx,
        "Subscribe",
        &format!(
            "<h1>Subscribe to our mailing list</h1>\n{}",
            form("/subscribers/create", None, "Subscribe")
        ),
    )
}

pub fn show_view(ctx: &PageContext, subscriber: &Subscriber) -> HttpResponse {
    page(
        ctx,
        &subscriber.name,
        &format!(
            r#"<h1>{name}</h1>
    <table>
        {email}
        {zip}
    </table>
    <p><a href="/subscribers/{id}/edit">Edit</a> {delete}</p>
    <p><a href="/subscribers">All subscribers</a></p>"#,
            name = escape(&subscriber.name),
            email = detail_row("Email", &subscriber.email),
            zip = detail_row("Zip code", &optional_number(subscriber.zip_code)),
            id = subscriber.id,
            delete =
                delete_link(&format!("/subscribers/{}/delete", subscriber.id)),
        ),
    )
}

pub fn edit_view(ctx: &PageContext, subscriber: &Subscriber) -> HttpResponse {
    page(
        ctx,
        "Edit subscriber",
        &format!(
            "<h1>Edit {}</h1>\n{}",
            escape(&subscriber.name),
            form(
                &format!("/subscribers/{}/update?_method=PUT", subscriber.id),
                Some(subscriber),
                "Update"
            )
        ),
    )
}

fn form(action: &str, subscriber: Option<&Subscriber>, submit: &str) -> String {
    let name = subscriber.map(|s| escape(&s.name)).unwrap_or_default();
    let email = subscriber.map(|s| escape(&s.email)).unwrap_or_default();
    let zip = optional_number(subscriber.and_then(|s| s.zip_code));

    format!(
        r#"<form action="{action}" method="POST">
        <label>Name
            <input type="text" name="name" value="{name}" required>
        </label>
        <label>Email
            <input type="email" name="email" value="{email}" required>
        </label>
        <label>Zip code
            <input type="text" name="zipCode" value="{zip}" pattern="\d{{5}}">
        </label>
        <button type="submit">{submit}</button>
    </form>"#
    )
}
