use actix_web::HttpResponse;

use super::page;
use crate::authentication::PageContext;

pub fn index_view(ctx: &PageContext) -> HttpResponse {
    let greeting = match &ctx.current_user {
        Some(user) => format!(
            "<p>Welcome back, {}!</p>",
            super::escape(&user.first_name)
        ),
        None => String::new(),
    };

    page(
        ctx,
        "Home",
        &format!(
            r#"<h1>Welcome to Confetti Cuisine!</h1>
    {greeting}
    <p>Cooking classes for every appetite.
    Browse our <a href="/courses">courses</a>
    or <a href="/subscribers/new">subscribe</a> to hear about new ones.</p>"#
        ),
    )
}
