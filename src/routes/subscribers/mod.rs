//! `/subscribers` controller: mailing-list signups.

mod delete;
mod get;
mod post;
mod put;

pub use delete::delete;
pub use get::{edit, index, new, show};
pub use post::create;
pub use put::update;

use crate::domain::{NewSubscriber, ValidationErrors};

#[derive(serde::Deserialize)]
pub struct SubscriberForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(rename = "zipCode", alias = "zip_code")]
    zip_code: Option<String>,
}

impl TryFrom<SubscriberForm> for NewSubscriber {
    type Error = ValidationErrors;

    fn try_from(form: SubscriberForm) -> Result<Self, Self::Error> {
        NewSubscriber::parse(form.name, form.email, form.zip_code)
    }
}
