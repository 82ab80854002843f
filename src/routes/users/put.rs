use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use super::{validate, UserForm};
use crate::domain::UserChanges;
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::store::{Store, StoreError, UserStore};

#[tracing::instrument(name = "update user", skip(form, store))]
pub async fn update(
    path: web::Path<Uuid>,
    form: web::Form<UserForm>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let edit_form = format!("/users/{}/edit", id);

    let changes: UserChanges = match validate(form.into_inner(), &edit_form) {
        Ok(changes) => changes,
        Err(response) => return Ok(response),
    };

    match store.update_user(id, &changes).await {
        Ok(Some(user)) => {
            FlashMessage::success(format!("{} updated.", user.full_name()))
                .send();
            Ok(see_other(&format!("/users/{}", id)))
        }
        Ok(None) => Err(AppError::NotFound),
        Err(StoreError::Conflict(message)) => {
            Ok(redirect_with_error(message, &edit_form))
        }
        Err(e) => Err(e.into()),
    }
}
