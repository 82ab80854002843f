use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use actix_web_flash_messages::{IncomingFlashMessages, Level};

use crate::models::User;
use crate::routes::e500;
use crate::session::TypedSession;
use crate::store::{Store, UserStore};

/// Everything a page needs to know about the request it renders for: the
/// pending flash messages and the logged-in user, if any.
///
/// Built once per request; extracting it consumes the flash messages.
pub struct PageContext {
    pub flash_messages: Vec<(Level, String)>,
    pub current_user: Option<User>,
}

impl PageContext {
    pub fn logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Context for pages rendered outside of a handler (e.g. error pages).
    pub fn anonymous() -> Self {
        Self {
            flash_messages: Vec::new(),
            current_user: None,
        }
    }
}

impl FromRequest for PageContext {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let flash_messages = IncomingFlashMessages::from_request(req, payload);
        let session = TypedSession::from_request(req, payload);
        let store = req.app_data::<web::Data<dyn Store>>().cloned();

        Box::pin(async move {
            let flash_messages = flash_messages
                .await?
                .iter()
                .map(|m| (m.level(), m.content().to_string()))
                .collect();

            let session = session.await?;
            let user_id = session.get_user_id().map_err(e500)?;
            let current_user = match (user_id, store) {
                (Some(user_id), Some(store)) => {
                    store.find_user(user_id).await.map_err(e500)?
                }
                _ => None,
            };

            Ok(PageContext {
                flash_messages,
                current_user,
            })
        })
    }
}
