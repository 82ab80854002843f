use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::authentication::PageContext;
use crate::models::Course;
use crate::routes::AppError;
use crate::store::{CourseStore, Store};
use crate::views::courses as views;

#[tracing::instrument(name = "list courses", skip(store, ctx))]
pub async fn index(
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let courses = store.list_courses().await?;
    Ok(views::index_view(&ctx, &courses))
}

pub async fn new(ctx: PageContext) -> HttpResponse {
    views::new_view(&ctx)
}

#[tracing::instrument(name = "show course", skip(store, ctx))]
pub async fn show(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let course = fetch(store.get_ref(), path.into_inner()).await?;
    Ok(views::show_view(&ctx, &course))
}

#[tracing::instrument(name = "edit course", skip(store, ctx))]
pub async fn edit(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let course = fetch(store.get_ref(), path.into_inner()).await?;
    Ok(views::edit_view(&ctx, &course))
}

async fn fetch(store: &dyn Store, id: Uuid) -> Result<Course, AppError> {
    store.find_course(id).await?.ok_or(AppError::NotFound)
}
