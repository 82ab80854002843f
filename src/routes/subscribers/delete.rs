use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use crate::routes::{see_other, AppError};
use crate::store::{Store, SubscriberStore};

/// Users that were linked to this subscriber keep the (now dangling) id.
#[tracing::instrument(name = "delete subscriber", skip(store))]
pub async fn delete(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    if !store.delete_subscriber(path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    FlashMessage::success("Subscriber deleted.").send();
    Ok(see_other("/subscribers"))
}
