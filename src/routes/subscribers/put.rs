use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use super::SubscriberForm;
use crate::domain::NewSubscriber;
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{Store, StoreError, SubscriberStore};

#[tracing::instrument(name = "update subscriber", skip(form, store))]
pub async fn update(
    path: web::Path<Uuid>,
    form: web::Form<SubscriberForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let edit_form = format!("/subscribers/{}/edit", id);

    let changes = match NewSubscriber::try_from(form.0) {
        Ok(changes) => changes,
        Err(errors) => {
            return Ok(redirect_with_error(errors.to_string(), &edit_form))
        }
    };

    match store.update_subscriber(id, &changes).await {
        Ok(Some(subscriber)) => {
            FlashMessage::success(format!("{} updated.", subscriber.name))
                .send();
            Ok(see_other(&format!("/subscribers/{}", id)))
        }
        Ok(None) => Err(AppError::NotFound),
        Err(StoreError::Conflict(message)) => {
            Ok(redirect_with_error(message, &edit_form))
        }
        Err(e) => Err(e.into()),
    }
}
