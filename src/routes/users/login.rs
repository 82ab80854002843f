use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;

use crate::authentication::{
    validate_credentials, AuthError, Credentials, PageContext,
};
use crate::routes::{redirect_with_error, see_other, AppError};
use crate::session::TypedSession;
use crate::store::Store;
use crate::views::users as views;

#[derive(serde::Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    password: Option<Secret<String>>,
}

pub async fn login(ctx: PageContext) -> HttpResponse {
    views::login_view(&ctx)
}

#[tracing::instrument(
    skip(form, store, session),
    fields(email = %form.email, user_id = tracing::field::Empty)
)]
pub async fn authenticate(
    form: web::Form<LoginForm>,
    store: web::Data<dyn Store>,
    session: TypedSession,
) -> Result<HttpResponse, AppError> {
    let LoginForm { email, password } = form.into_inner();
    let credentials = Credentials {
        email,
        password: password.unwrap_or_else(|| Secret::new(String::new())),
    };

    match validate_credentials(credentials, store.get_ref()).await {
        Ok(user_id) => {
            tracing::Span::current()
                .record("user_id", &tracing::field::display(&user_id));
            session.renew();
            session.insert_user_id(user_id)?;
            FlashMessage::success("Logged in!").send();
            Ok(see_other("/"))
        }
        Err(AuthError::InvalidCredentials(e)) => {
            tracing::warn!(error.cause_chain = ?e, "failed login attempt");
            Ok(redirect_with_error("Failed to login.", "/users/login"))
        }
        Err(AuthError::UnexpectedError(e)) => Err(AppError::Unexpected(e)),
    }
}
