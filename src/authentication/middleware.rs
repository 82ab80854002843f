use std::ops::Deref;

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{FromRequest, HttpMessage};
use actix_web_flash_messages::FlashMessage;
use actix_web_lab::middleware::Next;
use uuid::Uuid;

use crate::routes::{e500, see_other};
use crate::session::TypedSession;

/// Id of the logged-in user, inserted into the request extensions by
/// [`reject_anonymous_users`].
#[derive(Copy, Clone, Debug)]
pub struct UserId(Uuid);

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Lets logged-in requests through; anonymous ones are redirected to the
/// login form with an error flash message.
pub async fn reject_anonymous_users<B: MessageBody>(
    mut req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session.get_user_id().map_err(e500)? {
        Some(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        None => {
            tracing::info!("rejected anonymous request to {}", req.path());
            FlashMessage::error("You must be logged in to do that.").send();
            let response = see_other("/users/login");
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}
