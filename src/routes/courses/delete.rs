use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use crate::routes::{see_other, AppError};
use crate::store::{CourseStore, Store};

/// Users enrolled in the course keep the (now dangling) reference.
#[tracing::instrument(name = "delete course", skip(store))]
pub async fn delete(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    if !store.delete_course(path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    FlashMessage::success("Course deleted.").send();
    Ok(see_other("/courses"))
}
