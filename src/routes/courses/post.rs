use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use super::CourseForm;
use crate::authentication::UserId;
use crate::domain::NewCourse;
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{CourseStore, Store, StoreError, UserStore};

#[tracing::instrument(
    name = "adding a new course",
    skip(form, store),
    fields(course_title = %form.title)
)]
pub async fn create(
    form: web::Form<CourseForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let new_course = match NewCourse::try_from(form.0) {
        Ok(course) => course,
        Err(errors) => {
            return Ok(redirect_with_error(errors.to_string(), "/courses/new"))
        }
    };

    match store.insert_course(&new_course).await {
        Ok(course) => {
            tracing::info!(course_id = %course.id, "new course has been saved");
            FlashMessage::success(format!(
                "{} created successfully!",
                course.title
            ))
            .send();
            Ok(see_other("/courses"))
        }
        Err(StoreError::Conflict(message)) => {
            Ok(redirect_with_error(message, "/courses/new"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Adds the course to the logged-in user's course list.
#[tracing::instrument(
    name = "join course",
    skip(store, user_id),
    fields(user_id = tracing::field::Empty)
)]
pub async fn join(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, AppError> {
    tracing::Span::current()
        .record("user_id", &tracing::field::display(**user_id));
    let course = store
        .find_course(path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;

    // The session may outlive the account it points to.
    if store.enroll_user(**user_id, course.id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    FlashMessage::success(format!("You joined {}!", course.title)).send();
    Ok(see_other("/courses"))
}
