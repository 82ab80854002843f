use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use uuid::Uuid;

use crate::authentication::UserId;
use crate::routes::{see_other, AppError};
use crate::session::TypedSession;
use crate::store::{Store, UserStore};

#[tracing::instrument(name = "delete user", skip(store, session, current_user))]
pub async fn delete(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
    session: TypedSession,
    current_user: web::ReqData<UserId>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !store.delete_user(id).await? {
        return Err(AppError::NotFound);
    }

    // Deleting your own account ends your session.
    if **current_user == id {
        session.logout();
    }
    FlashMessage::success("User deleted.").send();
    Ok(see_other("/users"))
}
