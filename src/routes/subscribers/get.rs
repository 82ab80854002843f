use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::authentication::PageContext;
use crate::models::Subscriber;
use crate::routes::AppError;
use crate::store::{Store, SubscriberStore};
use crate::views::subscribers as views;

#[tracing::instrument(name = "list subscribers", skip(store, ctx))]
pub async fn index(
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let subscribers = store.list_subscribers().await?;
    Ok(views::index_view(&ctx, &subscribers))
}

pub async fn new(ctx: PageContext) -> HttpResponse {
    views::new_view(&ctx)
}

#[tracing::instrument(name = "show subscriber", skip(store, ctx))]
pub async fn show(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let subscriber = fetch(store.get_ref(), path.into_inner()).await?;
    Ok(views::show_view(&ctx, &subscriber))
}

#[tracing::instrument(name = "edit subscriber", skip(store, ctx))]
pub async fn edit(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let subscriber = fetch(store.get_ref(), path.into_inner()).await?;
    Ok(views::edit_view(&ctx, &subscriber))
}

async fn fetch(store: &dyn Store, id: Uuid) -> Result<Subscriber, AppError> {
    store.find_subscriber(id).await?.ok_or(AppError::NotFound)
}
