use actix_web::HttpResponse;

use crate::authentication::PageContext;
use crate::views;

pub async fn home(ctx: PageContext) -> HttpResponse {
    views::home::index_view(&ctx)
}
