use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;

use crate::routes::see_other;
use crate::session::TypedSession;

pub async fn logout(session: TypedSession) -> HttpResponse {
    session.logout();
    FlashMessage::info("You have been logged out!").send();
    see_other("/")
}
