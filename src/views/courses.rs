use std::fmt::Write;

use actix_web::HttpResponse;

use super::{delete_link, detail_row, escape, page};
use crate::authentication::PageContext;
use crate::models::Course;

pub fn index_view(ctx: &PageContext, courses: &[Course]) -> HttpResponse {
    let enrolled = |course: &Course| {
        ctx.current_user
            .as_ref()
            .map(|u| u.courses.contains(&course.id))
    };

    let mut rows = String::new();
    for c in courses {
        let join = match enrolled(c) {
            Some(true) => "Joined".to_string(),
            Some(false) => format!(
                r#"<form action="/courses/{}/join" method="POST">
                <button type="submit">Join</button>
            </form>"#,
                c.id
            ),
            None => String::new(),
        };
        writeln!(
            rows,
            r#"<tr>
            <td><a href="/courses/{id}">{title}</a></td>
            <td>{description}</td>
            <td>{max_students}</td>
            <td>${cost}</td>
            <td>{join}</td>
            <td><a href="/courses/{id}/edit">Edit</a> {delete}</td>
        </tr>"#,
            id = c.id,
            title = escape(&c.title),
            description = escape(&c.description),
            max_students = c.max_students,
            cost = c.cost,
            delete = delete_link(&format!("/courses/{}/delete", c.id)),
        )
        .expect("writing to a String cannot fail");
    }

    page(
        ctx,
        "Courses",
        &format!(
            r#"<h1>Our courses</h1>
    <table>
        <tr>
            <th>Title</th><th>Description</th><th>Seats</th><th>Cost</th>
            <th></th><th></th>
        </tr>
        {rows}
    </table>
    <p><a href="/courses/new">Add a course</a></p>"#
        ),
    )
}

pub fn new_view(ctx: &PageContext) -> HttpResponse {
    page(
        ctx,
        "New course",
        &format!(
            "<h1>Add a course</h1>\n{}",
            form("/courses/create", None, "Create")
        ),
    )
}

pub fn show_view(ctx: &PageContext, course: &Course) -> HttpResponse {
    page(
        ctx,
        &course.title,
        &format!(
            r#"<h1>{title}</h1>
    <table>
        {description}
        {max_students}
        {cost}
    </table>
    <p><a href="/courses/{id}/edit">Edit</a> {delete}</p>
    <p><a href="/courses">All courses</a></p>"#,
            title = escape(&course.title),
            description = detail_row("Description", &course.description),
            max_students =
                detail_row("Seats", &course.max_students.to_string()),
            cost = detail_row("Cost", &format!("${}", course.cost)),
            id = course.id,
            delete = delete_link(&format!("/courses/{}/delete", course.id)),
        ),
    )
}

pub fn edit_view(ctx: &PageContext, course: &Course) -> HttpResponse {
    page(
        ctx,
        "Edit course",
        &format!(
            "<h1>Edit {}</h1>\n{}",
            escape(&course.title),
            form(
                &format!("/courses/{}/update?_method=PUT", course.id),
                Some(course),
                "Update"
            )
        ),
    )
}

fn form(action: &str, course: Option<&Course>, submit: &str) -> String {
    let title = course.map(|c| escape(&c.title)).unwrap_or_default();
    let description =
        course.map(|c| escape(&c.description)).unwrap_or_default();
    let max_students = course.map(|c| c.max_students).unwrap_or(0);
    let cost = course.map(|c| c.cost).unwrap_or(0);

    format!(
        r#"<form action="{action}" method="POST">
        <label>Title
            <input type="text" name="title" value="{title}" required>
        </label>
        <label>Description
            <textarea name="description" required>{description}</textarea>
        </label>
        <label>Seats
            <input type="number" name="maxStudents" min="0"
                value="{max_students}">
        </label>
        <label>Cost
            <input type="number" name="cost" min="0" value="{cost}">
        </label>
        <button type="submit">{submit}</button>
    </form>"#
    )
}
