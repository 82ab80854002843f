use crate::domain::{EmailAddress, PersonName, ValidationErrors, ZipCode};

#[derive(Debug)]
pub struct NewSubscriber {
    pub name: PersonName,
    pub email: EmailAddress,
    pub zip_code: Option<ZipCode>,
}

impl NewSubscriber {
    pub fn parse(
        name: String,
        email: String,
        zip_code: Option<String>,
    ) -> Result<NewSubscriber, ValidationErrors> {
        match (
            PersonName::parse(name, "Name"),
            EmailAddress::parse(email),
            ZipCode::parse_optional(zip_code),
        ) {
            (Ok(name), Ok(email), Ok(zip_code)) => Ok(Self {
                name,
                email,
                zip_code,
            }),
            (name, email, zip_code) => {
                Err([name.err(), email.err(), zip_code.err()]
                    .into_iter()
                    .collect())
            }
        }
    }
}
