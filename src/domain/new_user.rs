use secrecy::{ExposeSecret, Secret};

use crate::domain::{EmailAddress, PersonName, ValidationErrors, ZipCode};

/// Editable profile fields of a user account.
#[derive(Debug)]
pub struct UserChanges {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub zip_code: Option<ZipCode>,
}

/// A validated signup. The subscriber link is resolved separately, before the
/// record is persisted.
#[derive(Debug)]
pub struct NewUser {
    pub profile: UserChanges,
    pub password: Secret<String>,
}

impl UserChanges {
    pub fn parse(
        first_name: String,
        last_name: String,
        email: String,
        zip_code: Option<String>,
    ) -> Result<UserChanges, ValidationErrors> {
        match (
            PersonName::parse(first_name, "First name"),
            PersonName::parse(last_name, "Last name"),
            EmailAddress::parse(email),
            ZipCode::parse_optional(zip_code),
        ) {
            (Ok(first_name), Ok(last_name), Ok(email), Ok(zip_code)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    email,
                    zip_code,
                })
            }
            (first_name, last_name, email, zip_code) => Err([
                first_name.err(),
                last_name.err(),
                email.err(),
                zip_code.err(),
            ]
            .into_iter()
            .collect()),
        }
    }
}

impl NewUser {
    pub fn parse(
        first_name: String,
        last_name: String,
        email: String,
        zip_code: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<NewUser, ValidationErrors> {
        let password = password
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or_else(|| "Password cannot be empty".to_string());

        match (
            UserChanges::parse(first_name, last_name, email, zip_code),
            password,
        ) {
            (Ok(profile), Ok(password)) => Ok(Self { profile, password }),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(errors), password) => Err(errors
                .messages()
                .iter()
                .cloned()
                .map(Some)
                .chain(std::iter::once(password.err()))
                .collect()),
        }
    }
}
