use actix_web::http::StatusCode;
use actix_web::HttpResponse;

use super::page_with_status;
use crate::authentication::PageContext;

pub const NOT_FOUND_MESSAGE: &str = "The page does not exist!";
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Sorry, our application is taking a nap!";

pub fn not_found_view(ctx: &PageContext) -> HttpResponse {
    page_with_status(
        StatusCode::NOT_FOUND,
        ctx,
        "Page not found",
        &format!("<h1>404 | {NOT_FOUND_MESSAGE}</h1>"),
    )
}

pub fn internal_error_view(ctx: &PageContext) -> HttpResponse {
    page_with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        ctx,
        "Internal error",
        &format!("<h1>500 | {INTERNAL_ERROR_MESSAGE}</h1>"),
    )
}
