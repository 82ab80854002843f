use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use super::CourseForm;
use crate::domain::NewCourse;
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{CourseStore, Store, StoreError};

#[tracing::instrument(name = "update course", skip(form, store))]
pub async fn update(
    path: web::Path<Uuid>,
    form: web::Form<CourseForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let edit_form = format!("/courses/{}/edit", id);

    let changes = match NewCourse::try_from(form.0) {
        Ok(changes) => changes,
        Err(errors) => {
            return Ok(redirect_with_error(errors.to_string(), &edit_form))
        }
    };

    match store.update_course(id, &changes).await {
        Ok(Some(course)) => {
            FlashMessage::success(format!("{} updated.", course.title)).send();
            Ok(see_other(&format!("/courses/{}", id)))
        }
        Ok(None) => Err(AppError::NotFound),
        Err(StoreError::Conflict(message)) => {
            Ok(redirect_with_error(message, &edit_form))
        }
        Err(e) => Err(e.into()),
    }
}
