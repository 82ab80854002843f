use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::authentication::PageContext;
use crate::models::User;
use crate::routes::AppError;
use crate::store::{CourseStore, Store, SubscriberStore, UserStore};
use crate::views::users as views;

#[tracing::instrument(name = "list users", skip(store, ctx))]
pub async fn index(
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let users = store.list_users().await?;
    Ok(views::index_view(&ctx, &users))
}

pub async fn new(ctx: PageContext) -> HttpResponse {
    views::new_view(&ctx)
}

#[tracing::instrument(name = "show user", skip(store, ctx))]
pub async fn show(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let user = fetch(store.get_ref(), path.into_inner()).await?;

    let all_courses = store.list_courses().await?;
    let courses: Vec<_> = user
        .courses
        .iter()
        .filter_map(|id| all_courses.iter().find(|c| c.id == *id).cloned())
        .collect();

    let subscriber = match user.subscribed_account {
        Some(id) => store.find_subscriber(id).await?,
        None => None,
    };

    Ok(views::show_view(&ctx, &user, &courses, subscriber.as_ref()))
}

#[tracing::instrument(name = "edit user", skip(store, ctx))]
pub async fn edit(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    ctx: PageContext,
) -> Result<HttpResponse, AppError> {
    let user = fetch(store.get_ref(), path.into_inner()).await?;
    Ok(views::edit_view(&ctx, &user))
}

async fn fetch(store: &dyn Store, id: Uuid) -> Result<User, AppError> {
    store.find_user(id).await?.ok_or(AppError::NotFound)
}
