//! `/users` controller: accounts, signup and login.

mod delete;
mod get;
mod login;
mod logout;
mod post;
mod put;

pub use delete::delete;
pub use get::{edit, index, new, show};
pub use login::{authenticate, login};
pub use logout::logout;
pub use post::create;
pub use put::update;

use actix_web::HttpResponse;
use secrecy::Secret;

use crate::domain::{NewUser, UserChanges, ValidationErrors};
use crate::routes::redirect_with_error;

/// Signup and profile form. Name fields are also accepted in their nested
/// `name.first` / `name.last` spelling.
#[derive(serde::Deserialize)]
pub struct UserForm {
    #[serde(default, alias = "name.first")]
    first: String,
    #[serde(default, alias = "name.last")]
    last: String,
    #[serde(default)]
    email: String,
    password: Option<Secret<String>>,
    #[serde(rename = "zipCode", alias = "zip_code")]
    zip_code: Option<String>,
}

impl TryFrom<UserForm> for NewUser {
    type Error = ValidationErrors;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        NewUser::parse(
            form.first,
            form.last,
            form.email,
            form.zip_code,
            form.password,
        )
    }
}

impl TryFrom<UserForm> for UserChanges {
    type Error = ValidationErrors;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        UserChanges::parse(form.first, form.last, form.email, form.zip_code)
    }
}

/// Field-level checks run ahead of `create` and `update`. On failure the
/// errors are flashed and the client is sent back to `form_path`.
fn validate<T>(form: UserForm, form_path: &str) -> Result<T, HttpResponse>
where
    T: TryFrom<UserForm, Error = ValidationErrors>,
{
    T::try_from(form).map_err(|errors| {
        tracing::info!(errors = %errors, "user input failed validation");
        redirect_with_error(errors.to_string(), form_path)
    })
}
