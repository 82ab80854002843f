use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use super::{validate, UserForm};
use crate::authentication::compute_password_hash;
use crate::domain::{EmailAddress, NewUser};
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{Store, StoreError, SubscriberStore, UserStore};

#[tracing::instrument(
    name = "adding a new user",
    skip(form, store),
    fields(user_email = %form.email)
)]
pub async fn create(
    form: web::Form<UserForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let new_user: NewUser = match validate(form.into_inner(), "/users/new") {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let subscribed_account =
        associate_subscriber(store.get_ref(), &new_user.profile.email).await?;
    let password_hash = compute_password_hash(new_user.password).await?;

    match store
        .insert_user(&new_user.profile, subscribed_account, password_hash)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "new user has been saved");
            FlashMessage::success(format!(
                "{}'s account created successfully!",
                user.full_name()
            ))
            .send();
            Ok(see_other("/users"))
        }
        Err(StoreError::Conflict(message)) => Ok(redirect_with_error(
            format!("Failed to create user account because: {}", message),
            "/users/new",
        )),
        Err(e) => Err(e.into()),
    }
}

/// Id of the mailing-list subscriber registered under the same email, if
/// any. Not finding one is fine; failing to look is not.
#[tracing::instrument(name = "associating subscriber", skip(store))]
async fn associate_subscriber(
    store: &dyn Store,
    email: &EmailAddress,
) -> Result<Option<Uuid>, AppError> {
    match store.find_subscriber_by_email(email.as_ref()).await {
        Ok(subscriber) => Ok(subscriber.map(|s| s.id)),
        Err(e) => {
            tracing::error!("error in associating subscriber: {:?}", e);
            Err(e.into())
        }
    }
}
