use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use super::SubscriberForm;
use crate::domain::NewSubscriber;
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{Store, StoreError, SubscriberStore};

#[tracing::instrument(
    name = "adding a new subscriber",
    skip(form, store),
    fields(
        subscriber_email = %form.email,
        subscriber_name = %form.name
    )
)]
pub async fn create(
    form: web::Form<SubscriberForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let new_subscriber = match NewSubscriber::try_from(form.0) {
        Ok(subscriber) => subscriber,
        Err(errors) => {
            return Ok(redirect_with_error(
                errors.to_string(),
                "/subscribers/new",
            ))
        }
    };

    match store.insert_subscriber(&new_subscriber).await {
        Ok(subscriber) => {
            tracing::info!(
                subscriber_id = %subscriber.id,
                "new subscriber has been saved"
            );
            FlashMessage::success(format!(
                "{} subscribed successfully!",
                subscriber.name
            ))
            .send();
            Ok(see_other("/subscribers"))
        }
        Err(StoreError::Conflict(message)) => {
            Ok(redirect_with_error(message, "/subscribers/new"))
        }
        Err(e) => Err(e.into()),
    }
}
